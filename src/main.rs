mod catalog;
mod config;
mod context;
mod error;
mod pricing;
mod render;
mod request;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::config::{config_dir, load_config, resolve_dir, Config, CONFIG_TEMPLATE};
use crate::context::{build_context, format_amount, CURRENCY_SYMBOL};
use crate::error::{DocError, Result};
use crate::pricing::Role;
use crate::render::RenderPlan;
use crate::request::{
    bounded_subsidy, parse_selections, DocType, DocumentRequest, PaymentDetails, PaymentMode,
};

#[derive(Parser)]
#[command(name = "orbitdoc")]
#[command(version, about = "Quotation and proforma receipt generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.orbitdoc or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with starter templates
    Init,

    /// List the item catalog
    Items,

    /// List roles and their subsidy caps
    Roles,

    /// Compute totals for a selection without generating a document
    Preview(PreviewArgs),

    /// Generate a document from a filled-in request
    Generate(GenerateArgs),
}

#[derive(Args)]
struct PreviewArgs {
    /// Document type: quotation, partial-receipt, or full-receipt
    #[arg(short = 't', long, value_name = "TYPE", default_value = "quotation")]
    doc_type: String,

    /// Line items in format "id:quantity" (can be repeated)
    #[arg(short, long, value_name = "ITEM:QTY")]
    item: Vec<String>,

    /// Who filled the form: telecaller, bdo, manager, or co-founder
    #[arg(long, value_name = "ROLE")]
    filled_by: Option<String>,

    /// Subsidy amount in rupees (quotations only; multiples of 1,000)
    #[arg(long)]
    subsidy: Option<i64>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Document type: quotation, partial-receipt, or full-receipt
    #[arg(short = 't', long, value_name = "TYPE")]
    doc_type: String,

    /// Document / receipt number (digits, at most 4)
    #[arg(short, long)]
    number: String,

    /// Document date (YYYY-MM-DD or DD/MM/YYYY, default: today)
    #[arg(long)]
    date: Option<String>,

    /// Customer name
    #[arg(long)]
    name: String,

    /// Customer address
    #[arg(long)]
    address: String,

    /// Customer phone number (10 digits)
    #[arg(long)]
    phone: String,

    /// Customer email (optional)
    #[arg(long)]
    email: Option<String>,

    /// Who filled the form: telecaller, bdo, manager, or co-founder
    #[arg(long, value_name = "ROLE")]
    filled_by: Option<String>,

    /// Line items in format "id:quantity" (can be repeated)
    #[arg(short, long, value_name = "ITEM:QTY")]
    item: Vec<String>,

    /// Subsidy amount in rupees (quotations only; multiples of 1,000)
    #[arg(long)]
    subsidy: Option<i64>,

    /// Amount received (receipts)
    #[arg(long)]
    amount_received: Option<String>,

    /// Payment mode: cashfree, cash, or free text
    #[arg(long)]
    payment_mode: Option<String>,

    /// Payment reference id (optional)
    #[arg(long)]
    reference_id: Option<String>,

    /// Payment date (default: today)
    #[arg(long)]
    payment_date: Option<String>,

    /// Balance due (partial receipts)
    #[arg(long)]
    balance_due: Option<String>,

    /// Tentative delivery date (partial receipts, default: today)
    #[arg(long)]
    tentative_delivery: Option<String>,

    /// Delivery date (full receipts, default: today)
    #[arg(long)]
    delivery_date: Option<String>,

    /// Attempt a PDF rendition alongside the DOCX
    #[arg(long)]
    pdf: bool,

    /// Custom output file path for the DOCX (default: output dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the generated document with the system default viewer
    #[arg(long)]
    open: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Items => cmd_items(&cfg_dir),
        Commands::Roles => cmd_roles(&cfg_dir),
        Commands::Preview(args) => cmd_preview(&cfg_dir, args),
        Commands::Generate(args) => cmd_generate(&cfg_dir, args),
    }
}

// Table row structs for tabled
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "ITEM")]
    name: String,
    #[tabled(rename = "UNIT PRICE")]
    price: String,
    #[tabled(rename = "MIN QTY")]
    min: u32,
}

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "CAP (1 BATTERY)")]
    single: String,
    #[tabled(rename = "CAP (2+ BATTERIES)")]
    double: String,
}

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "ITEM")]
    name: String,
    #[tabled(rename = "QTY")]
    quantity: u32,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

fn rupees(value: i64) -> String {
    format!("{CURRENCY_SYMBOL} {}", format_amount(value))
}

fn parse_doc_type(raw: &str) -> Result<DocType> {
    DocType::parse(raw).ok_or_else(|| DocError::InvalidDocType(raw.to_string()))
}

fn parse_role(raw: &str) -> Result<Role> {
    Role::parse(raw).ok_or_else(|| DocError::InvalidRole(raw.to_string()))
}

/// Initialize config directory with config and starter templates
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(DocError::AlreadyInitialized(cfg_dir.clone()));
    }

    // Create directories
    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    let template_dir = cfg_dir.join("templates");
    fs::create_dir_all(&template_dir)?;

    // Write config and one starter template per document type
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    let defaults = Config::default();
    for doc_type in [
        DocType::QuotationSummary,
        DocType::PartialProformaReceipt,
        DocType::FullProformaReceipt,
    ] {
        let path = template_dir.join(defaults.templates.file_for(doc_type));
        render::write_starter_template(&path, doc_type)?;
    }

    println!("Initialized orbitdoc config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Review settings:           $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Replace starter templates: {}/templates/",
        cfg_dir.display()
    );
    println!();
    println!("Then generate your first document:");
    println!("  orbitdoc generate -t quotation -n 1 --name \"Customer\" --address \"Address\" \\");
    println!("    --phone 9876543210 --item pt-pro:1 --item battery:1");

    Ok(())
}

/// List the item catalog
fn cmd_items(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(DocError::ConfigNotFound(cfg_dir.clone()));
    }

    let rows: Vec<ItemRow> = catalog::CATALOG
        .iter()
        .map(|item| ItemRow {
            id: item.id.to_string(),
            name: item.name.to_string(),
            price: rupees(item.unit_price),
            min: item.min_quantity,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List roles and their subsidy caps
fn cmd_roles(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(DocError::ConfigNotFound(cfg_dir.clone()));
    }

    let rows: Vec<RoleRow> = Role::ALL
        .iter()
        .map(|role| {
            let caps = role.caps();
            RoleRow {
                role: role.label().to_string(),
                single: rupees(caps.single_battery),
                double: rupees(caps.double_battery),
            }
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Compute totals for a selection without generating a document
fn cmd_preview(cfg_dir: &PathBuf, args: PreviewArgs) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(DocError::ConfigNotFound(cfg_dir.clone()));
    }

    let doc_type = parse_doc_type(&args.doc_type)?;
    let filled_by = args.filled_by.as_deref().map(parse_role).transpose()?;
    let selections = parse_selections(&args.item)?;
    if selections.is_empty() {
        return Err(DocError::NoItems);
    }

    let subsidy = bounded_subsidy(doc_type, filled_by, &selections, args.subsidy)?;
    let result = pricing::price(&selections, subsidy);

    let rows: Vec<PreviewRow> = selections
        .iter()
        .map(|sel| PreviewRow {
            name: sel.item.name.to_string(),
            quantity: sel.quantity,
            amount: rupees(sel.item.unit_price * i64::from(sel.quantity)),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("Total Price: {}", rupees(result.total_price));
    if doc_type == DocType::QuotationSummary {
        println!("Subsidy:     {}", rupees(result.subsidy));
    }
    println!("Final Price: {}", rupees(result.final_price));

    Ok(())
}

/// Generate a document from a filled-in request
fn cmd_generate(cfg_dir: &PathBuf, args: GenerateArgs) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(DocError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    let doc_type = parse_doc_type(&args.doc_type)?;
    let filled_by = args.filled_by.as_deref().map(parse_role).transpose()?;
    let selections = parse_selections(&args.item)?;

    let today = Local::now().date_naive();
    let date = match args.date.as_deref() {
        Some(raw) => request::parse_date(raw)?,
        None => today,
    };

    // Payment fields only exist on receipt documents
    let payment = if doc_type.is_receipt() {
        let parse_or_today = |raw: Option<&str>| -> Result<chrono::NaiveDate> {
            match raw {
                Some(s) => request::parse_date(s),
                None => Ok(today),
            }
        };

        PaymentDetails {
            amount_received: request::clip(
                args.amount_received.as_deref().unwrap_or("").trim(),
                12,
            ),
            mode: Some(PaymentMode::parse(
                args.payment_mode.as_deref().unwrap_or("cashfree"),
            )),
            reference_id: request::clip(args.reference_id.as_deref().unwrap_or("").trim(), 20),
            payment_date: Some(parse_or_today(args.payment_date.as_deref())?),
            balance_due: if doc_type == DocType::PartialProformaReceipt {
                request::clip(args.balance_due.as_deref().unwrap_or("").trim(), 12)
            } else {
                String::new()
            },
            tentative_delivery: if doc_type == DocType::PartialProformaReceipt {
                Some(parse_or_today(args.tentative_delivery.as_deref())?)
            } else {
                None
            },
            delivery_date: if doc_type == DocType::FullProformaReceipt {
                Some(parse_or_today(args.delivery_date.as_deref())?)
            } else {
                None
            },
        }
    } else {
        PaymentDetails::default()
    };

    let document_request = DocumentRequest {
        doc_type,
        doc_number: request::numeric_only(&args.number, request::DOC_NUMBER_DIGITS),
        date,
        customer_name: request::clip(args.name.trim(), 50),
        customer_address: args.address,
        customer_phone: request::numeric_only(&args.phone, request::PHONE_DIGITS),
        customer_email: request::clip(args.email.as_deref().unwrap_or("").trim(), 50),
        filled_by,
        selections,
        subsidy: args.subsidy,
        payment,
    };

    document_request.validate()?;

    let result = pricing::price(
        &document_request.selections,
        document_request.effective_subsidy(),
    );
    let ctx = build_context(&document_request, &result);

    let template_dir = resolve_dir(&config.templates.dir, cfg_dir);
    let template_path = template_dir.join(config.templates.file_for(doc_type));
    let output_dir = resolve_dir(&config.output.dir, cfg_dir);
    let letterhead = {
        let path = template_dir.join("letterhead.png");
        path.exists().then_some(path)
    };

    let plan = RenderPlan {
        template_path: &template_path,
        output_dir: &output_dir,
        soffice: &config.convert.soffice,
        letterhead,
        with_pdf: args.pdf,
        output_override: args.output,
    };
    let outcome = render::render(&document_request, &result, &ctx, &plan)?;

    // Print summary
    println!("Generated {} {}", doc_type.label(), document_request.doc_number);
    println!("  Customer: {}", document_request.customer_name);
    println!("  Total:    {}", rupees(result.total_price));
    if doc_type == DocType::QuotationSummary {
        println!("  Subsidy:  {}", rupees(result.subsidy));
    }
    println!("  Final:    {}", rupees(result.final_price));
    println!("  Saved:    {}", outcome.primary.path.display());
    if let Some(secondary) = &outcome.secondary {
        println!("  PDF:      {}", secondary.artifact().path.display());
    }

    if args.open {
        open_path(&outcome.primary.path)?;
    }

    Ok(())
}

fn open_path(path: &PathBuf) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .map_err(DocError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .map_err(DocError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", path.to_str().unwrap_or("")])
            .spawn()
            .map_err(DocError::Io)?;
    }
    Ok(())
}
