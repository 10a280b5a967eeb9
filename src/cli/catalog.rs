//! Catalog subcommand - inspect built-in domains.

use clap::Parser;

use crate::catalog::{builtin, builtin_names};

/// List built-in domains, or show one domain's kind table.
#[derive(Parser)]
pub struct CatalogCommand {
    /// Domain to show; lists all domain names when omitted.
    pub name: Option<String>,
}

impl CatalogCommand {
    /// Run the catalog command.
    pub fn run(self) -> color_eyre::Result<()> {
        match self.name {
            Some(name) => {
                let catalog = builtin(&name)
                    .ok_or_else(|| color_eyre::eyre::eyre!("unknown domain: {}", name))?;
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            }
            None => {
                for name in builtin_names() {
                    println!("{name}");
                }
            }
        }
        Ok(())
    }
}
