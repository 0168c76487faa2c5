//! Vitrine - content blocks and static rendering for multilingual marketing sites.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{fs, path::Path};
use vitrine::{
    block::{Block, create_default},
    build::build_site,
    cli::{Cli, Commands},
    config::SiteConfig,
    editor::GuidedEditor,
    log,
    section::{PageSections, SectionRegistry, blocks_to_sections},
    store::{DirStore, TranslationStore, save_translation},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => {
            config.validate_build()?;
            build_site(&config).map(|_| ())
        }
        Commands::Check => check(&config),
        Commands::Pages => list_pages(&config),
        Commands::Sections { slug, locale } => {
            print_sections(&config, slug, locale.as_deref().unwrap_or(&config.base.default_locale))
        }
        Commands::Apply {
            slug,
            sections,
            locale,
        } => apply_sections(
            &config,
            slug,
            sections,
            locale.as_deref().unwrap_or(&config.base.default_locale),
        ),
        Commands::NewBlock { block_type } => {
            let Some(block) = create_default(block_type) else {
                bail!("unknown block type `{block_type}`");
            };
            println!("{}", serde_json::to_string_pretty(&block)?);
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

fn registry(config: &SiteConfig) -> Result<SectionRegistry> {
    config.registry().context("Invalid [pages] configuration")
}

/// Validate every stored translation; fails if any is rejected.
fn check(config: &SiteConfig) -> Result<()> {
    registry(config)?;
    let records = DirStore::new(&config.build.content).list()?;

    let mut failures = 0;
    for record in &records {
        if let Err(e) = record.check() {
            failures += 1;
            log!("error"; "`{}` ({}): {e}", record.page_id, record.locale_code);
        }
    }

    if failures > 0 {
        bail!("{failures} of {} translations are invalid", records.len());
    }
    log!("check"; "{} translations ok", records.len());
    Ok(())
}

fn list_pages(config: &SiteConfig) -> Result<()> {
    let registry = registry(config)?;
    let records = DirStore::new(&config.build.content).list()?;

    let mut slugs: Vec<&str> = registry.slugs();
    slugs.extend(records.iter().map(|r| r.slug()));
    slugs.sort_unstable();
    slugs.dedup();

    for slug in slugs {
        let locales: Vec<_> = records
            .iter()
            .filter(|r| r.slug() == slug)
            .map(|r| format!("{}:{}", r.locale(), r.translation.status))
            .collect();
        let editor = match registry.sections_for(slug).len() {
            0 => "raw json".to_owned(),
            n => format!("{n} sections"),
        };
        log!("pages"; "{slug} ({editor}) [{}]", locales.join(", "));
    }
    Ok(())
}

fn print_sections(config: &SiteConfig, slug: &str, locale: &str) -> Result<()> {
    let registry = registry(config)?;
    let store = DirStore::new(&config.build.content);
    let blocks = store
        .load(slug, locale)?
        .map(|record| record.translation.blocks)
        .unwrap_or_default();

    if !registry.has_guided_editor(slug) {
        log!("sections"; "`{slug}` has no guided editor; printing raw blocks");
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }

    let sections = blocks_to_sections(&registry, slug, &blocks);
    println!("{}", serde_json::to_string_pretty(&sections)?);
    Ok(())
}

/// Write edited sections back through the guided editor and save.
fn apply_sections(config: &SiteConfig, slug: &str, file: &Path, locale: &str) -> Result<()> {
    let registry = registry(config)?;
    let store = DirStore::new(&config.build.content);
    let Some(mut record) = store.load(slug, locale)? else {
        bail!("no `{locale}` translation of `{slug}`");
    };

    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let edited: PageSections = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let mut editor = GuidedEditor::open(&registry, slug, record.translation.blocks.clone());
    let mut latest: Option<Vec<Block>> = None;
    for (id, data) in edited.sections {
        editor.update_section(&id, data, &mut |blocks: &[Block]| {
            latest = Some(blocks.to_vec());
            true
        })?;
    }

    let Some(blocks) = latest else {
        log!("sections"; "nothing to apply");
        return Ok(());
    };
    record.translation.blocks = blocks;
    save_translation(&store, &mut record)?;
    log!("sections"; "saved `{slug}` ({locale})");
    Ok(())
}
