//! Command-line front end

use crate::admin::{AdminEditor, AdminError};
use crate::core::Config;
use crate::session::SessionPrefs;
use crate::view::{self, CategoryFilter, SortRule};
use anyhow::Context;
use clap::{Parser, Subcommand};
use shared::{Language, ProductStatus, SaleItem};
use std::io::Write;
use vitrine_client::FileStore;

#[derive(Debug, Parser)]
#[command(name = "vitrine", version, about = "Product catalog storefront and admin tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the catalog grid
    Show {
        /// `all`, `soon` or a category name (this run only)
        #[arg(long)]
        category: Option<String>,
        /// `es` or `en` (this run only)
        #[arg(long)]
        lang: Option<Language>,
        /// `name`, `price-asc` or `price-desc` (this run only)
        #[arg(long)]
        sort: Option<SortRule>,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select the display language; toggles when omitted
    Lang { code: Option<Language> },
    /// Select the category tab (`all`, `soon` or a name)
    Category { name: String },
    /// Select the sort rule
    Sort { rule: SortRule },
    /// Select the repository holding the catalog
    Repo {
        owner: String,
        name: String,
        branch: Option<String>,
    },
    /// Edit the catalog and sales ledger in the repository
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List products with status and stock
    List,
    /// List sales with totals
    Sales,
    /// Change a product's status (`ok`, `out`, `soon`)
    Status { id: String, status: ProductStatus },
    /// Set a product's stock count
    Stock {
        id: String,
        #[arg(allow_negative_numbers = true)]
        stock: i64,
    },
    /// Remove a product
    DeleteProduct { id: String },
    /// Remove a sale and return its items to stock
    DeleteSale { id: String },
    /// Record a sale, e.g. `sell Ana p1:2 p4:1`
    Sell {
        customer: String,
        /// `productId:qty` pairs
        #[arg(required = true, value_parser = parse_item)]
        items: Vec<SaleItem>,
        /// Defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

fn parse_item(value: &str) -> Result<SaleItem, String> {
    let (id, qty) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected productId:qty, got '{}'", value))?;
    let qty = qty
        .parse::<i64>()
        .map_err(|_| format!("invalid quantity in '{}'", value))?;
    if id.is_empty() {
        return Err(format!("missing product id in '{}'", value));
    }
    Ok(SaleItem::new(id, qty))
}

/// Run a command, printing to stdout
pub async fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, config, &mut out).await
}

/// Run a command, printing to `out`
pub async fn run_with_output<W: Write>(cli: Cli, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let sessions = config.session_store();

    match cli.command {
        Command::Show {
            category,
            lang,
            sort,
            json,
        } => {
            let prefs = sessions.load();
            let mut state = prefs.view_state();
            if let Some(category) = category {
                state.category = CategoryFilter::parse(&category);
            }
            if let Some(lang) = lang {
                state.language = lang;
            }
            if let Some(sort) = sort {
                state.sort = sort;
            }

            let fetcher = config.catalog_fetcher(&prefs)?;
            match fetcher.fetch().await {
                Ok(catalog) => {
                    let model = view::render(&catalog, &state);
                    if json {
                        writeln!(out, "{}", serde_json::to_string_pretty(&model)?)?;
                    } else {
                        write!(out, "{}", view::render_text(&model))?;
                    }
                }
                Err(e) => {
                    tracing::error!("Catalog load failed: {}", e);
                    let panel = view::render_error(state.language, &e);
                    write!(out, "{}", view::render_error_text(&panel))?;
                }
            }
        }
        Command::Lang { code } => {
            let prefs = sessions.update(|p| match code {
                Some(lang) => p.language = lang,
                None => p.language.toggle(),
            })?;
            writeln!(out, "language: {}", prefs.language)?;
        }
        Command::Category { name } => {
            let filter = CategoryFilter::parse(&name);
            let prefs = sessions.update(|p| p.category = filter)?;
            writeln!(out, "category: {}", prefs.category.label(prefs.language))?;
        }
        Command::Sort { rule } => {
            let prefs = sessions.update(|p| p.sort = rule)?;
            writeln!(out, "sort: {}", prefs.sort)?;
        }
        Command::Repo {
            owner,
            name,
            branch,
        } => {
            let prefs = sessions.update(|p| {
                p.owner = Some(owner);
                p.repo = Some(name);
                if branch.is_some() {
                    p.branch = branch;
                }
            })?;
            let store = config.store_config(&prefs);
            writeln!(out, "repository: {}/{}@{}", store.owner, store.repo, store.branch)?;
        }
        Command::Admin { action } => {
            let prefs = sessions.load();
            run_admin(action, config, &prefs, out).await?;
        }
    }
    Ok(())
}

async fn run_admin<W: Write>(
    action: AdminCommand,
    config: &Config,
    prefs: &SessionPrefs,
    out: &mut W,
) -> anyhow::Result<()> {
    let store_config = config.store_config(prefs);
    if !store_config.is_configured() {
        anyhow::bail!("no repository selected; run `vitrine repo <owner> <name>` first");
    }
    if store_config.token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set; writes will be rejected");
    }

    let client = store_config.build_client()?;
    let editor = AdminEditor::load(client, config.document_paths())
        .await
        .context("loading catalog and sales ledger")?;
    run_admin_action(action, editor, prefs.language, out).await
}

/// Apply one admin command to a loaded editor
pub async fn run_admin_action<S: FileStore, W: Write>(
    action: AdminCommand,
    mut editor: AdminEditor<S>,
    lang: Language,
    out: &mut W,
) -> anyhow::Result<()> {
    let outcome = match action {
        AdminCommand::List => {
            for p in &editor.catalog().products {
                writeln!(
                    out,
                    "{:<10} {:<5} {:>5} {:>9}  {}",
                    p.id,
                    p.status.as_str(),
                    p.stock,
                    view::model::format_price(p.price),
                    p.display_name(lang)
                )?;
            }
            return Ok(());
        }
        AdminCommand::Sales => {
            for s in editor.sales_summary() {
                writeln!(
                    out,
                    "{:<6} {:<12} {:<20} {:>4} {:>9}",
                    s.id,
                    s.date,
                    s.customer,
                    s.units,
                    view::model::format_price(s.total)
                )?;
            }
            return Ok(());
        }
        AdminCommand::Status { id, status } => editor
            .edit_status(&id, status)
            .await
            .map(|()| format!("{} is now {}", id, status)),
        AdminCommand::Stock { id, stock } => editor
            .set_stock(&id, stock)
            .await
            .map(|()| format!("{} stock is now {}", id, stock)),
        AdminCommand::DeleteProduct { id } => editor
            .delete_product(&id)
            .await
            .map(|p| format!("deleted {} ({})", p.id, p.display_name(lang))),
        AdminCommand::DeleteSale { id } => editor.delete_sale(&id).await.map(|r| {
            let mut msg = format!("deleted sale {}; restocked {}", r.sale.id, r.restocked.join(", "));
            if !r.missing.is_empty() {
                msg.push_str(&format!("; skipped missing {}", r.missing.join(", ")));
            }
            msg
        }),
        AdminCommand::Sell {
            customer,
            items,
            date,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            editor
                .record_sale(&customer, &date, items)
                .await
                .map(|s| format!("recorded sale {} ({} units)", s.id, s.units()))
        }
    };

    match outcome {
        Ok(line) => writeln!(out, "{}", line)?,
        Err(AdminError::PartialSave(report)) => {
            writeln!(out, "warning: save only partly applied: {}", report)?;
            anyhow::bail!("partial save");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
