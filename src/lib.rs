//! Vitrine - content blocks, guided section editing and static rendering for
//! multilingual marketing sites.
//!
//! # Modules
//!
//! | Module      | Purpose                                               |
//! |-------------|-------------------------------------------------------|
//! | `block`     | Block model, validation, starter blocks               |
//! | `section`   | Section forms, page registry, block ↔ section adapter |
//! | `editor`    | Guided editing session and autosave                   |
//! | `page`      | Translations and the save boundary                    |
//! | `store`     | Translation storage, partners and insights            |
//! | `render`    | Public HTML renderer                                  |
//! | `build`     | Static site build                                     |
//! | `generator` | Sitemap                                               |
//! | `config`    | `vitrine.toml`                                        |

pub mod logger;

pub mod block;
pub mod build;
pub mod cli;
pub mod config;
pub mod editor;
pub mod generator;
pub mod page;
pub mod render;
pub mod section;
pub mod store;
pub mod utils;
