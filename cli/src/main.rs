mod logging;
mod table;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use salesdash_core::service::dto::SalesTableExport;
use salesdash_core::time::{current_month, current_year, parse_month, parse_upload_date};
use salesdash_core::{
    BrandService, HttpDashboardRepository, ManagerType, Selection, Settings, SheetService,
    SheetUpload, Timeframe, Week,
};

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(
    about = "Branded sales dashboard: brands, sheet uploads and per-manager sales tables",
    long_about = None
)]
struct Cli {
    /// Backend base URL (overrides SALESDASH_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List all brands
    Brands,
    /// Add, rename or delete a brand
    Brand {
        #[command(subcommand)]
        action: BrandAction,
    },
    /// List the sheets available for a brand
    Sheets {
        #[command(flatten)]
        filter: SheetFilter,
    },
    /// Show the sales table (with Grand Total) for a brand
    Show {
        #[command(flatten)]
        filter: SheetFilter,
        /// Sheet to open instead of the latest one
        #[arg(long)]
        sheet: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Upload a regional manager file and a sales data file
    Upload {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        brand_name: String,
        /// RBM, ZBM or ABM
        #[arg(long)]
        manager: ManagerType,
        /// Data date: YYYY-MM-DD, today or yesterday
        #[arg(long)]
        date: String,
        /// Regional manager spreadsheet (.xlsx/.xls)
        #[arg(long)]
        rm_file: PathBuf,
        /// Sales data spreadsheet (.xlsx/.xls)
        #[arg(long)]
        sales_file: PathBuf,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum BrandAction {
    /// Add a new brand
    Add { name: String },
    /// Rename a brand
    Rename { id: String, name: String },
    /// Delete a brand
    Delete { id: String },
}

#[derive(clap::Args)]
struct SheetFilter {
    /// Brand id
    #[arg(long)]
    brand: String,
    /// RBM, ZBM or ABM (defaults to the configured manager type)
    #[arg(long)]
    manager: Option<ManagerType>,
    /// Month name or number; switches to the monthly view
    #[arg(long)]
    month: Option<String>,
    /// Year for the monthly view (defaults to this year)
    #[arg(long)]
    year: Option<i32>,
    /// Week within the month (1-5); omitted means all weeks
    #[arg(long)]
    week: Option<Week>,
}

impl SheetFilter {
    fn selection(&self, default_manager: ManagerType) -> Result<Selection> {
        let manager_type = self.manager.unwrap_or(default_manager);
        let monthly = self.month.is_some() || self.year.is_some() || self.week.is_some();
        let timeframe = if monthly {
            let month = match &self.month {
                Some(m) => parse_month(m)?,
                None => current_month(),
            };
            Timeframe::Monthly {
                year: self.year.unwrap_or_else(current_year),
                month,
                week: self.week,
            }
        } else {
            Timeframe::Latest
        };
        Ok(Selection {
            manager_type,
            brand_id: self.brand.clone(),
            timeframe,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));

    let _guard = if interactive {
        Some(logging::init_file()?)
    } else {
        logging::init_stderr()?;
        None
    };

    let settings = Settings::resolve(None, cli.api_url, cli.timeout)?;
    let repo = HttpDashboardRepository::new(&settings)?;

    match cli.command {
        Some(Commands::Brands) => {
            let brands = BrandService::new(repo).list().context("Failed to load brands")?;
            if brands.is_empty() {
                println!("No brands found.");
            } else {
                println!("{}", table::render_brands(&brands));
            }
        }
        Some(Commands::Brand { action }) => {
            let service = BrandService::new(repo);
            match action {
                BrandAction::Add { name } => {
                    service.create(&name)?;
                    println!("Brand added: {}", name.trim());
                }
                BrandAction::Rename { id, name } => {
                    service.rename(&id, &name)?;
                    println!("Brand {} renamed to {}", id, name.trim());
                }
                BrandAction::Delete { id } => {
                    service.delete(&id)?;
                    println!("Brand {} deleted", id);
                }
            }
        }
        Some(Commands::Sheets { filter }) => {
            let selection = filter.selection(settings.default_manager_type)?;
            let view = SheetService::new(repo)
                .load(&selection)
                .context("Failed to fetch sheets")?;
            if view.sheets.is_empty() {
                println!("No sheets for {} / {}.", selection.manager_type, selection.timeframe);
            } else {
                let latest = view.selected_sheet().map(|s| s.id.as_str());
                println!("{}", table::render_sheets(&view.sheets, latest));
            }
        }
        Some(Commands::Show { filter, sheet, json }) => {
            let selection = filter.selection(settings.default_manager_type)?;
            let mut view = SheetService::new(repo)
                .load(&selection)
                .context("Failed to fetch sheets")?;
            if let Some(id) = sheet {
                if !view.select(&id) {
                    return Err(anyhow!("Sheet {} not found for this selection", id));
                }
            }

            if json {
                let export = SalesTableExport::new(view.records());
                println!("{}", serde_json::to_string_pretty(&export)?);
            } else if let Some(entry) = view.selected_sheet() {
                println!(
                    "{} [{}] Data up to {}",
                    entry.brand_name,
                    selection.manager_type,
                    entry.display_date()
                );
                println!("{}", table::render_sales(&view.table()));
            } else {
                println!("No data for {} / {}.", selection.manager_type, selection.timeframe);
            }
        }
        Some(Commands::Upload { brand, brand_name, manager, date, rm_file, sales_file }) => {
            let upload = SheetUpload {
                brand_id: brand,
                brand_name,
                manager_type: manager,
                data_date: parse_upload_date(&date)?,
                regional_manager_file: rm_file,
                sales_data_file: sales_file,
            };
            SheetService::new(repo).upload(&upload).context("Upload failed")?;
            println!("Files uploaded successfully!");
        }
        Some(Commands::Tui) | None => {
            let app = tui::app::App::new(repo.clone(), repo, settings.default_manager_type);
            tui::run(app)?;
        }
    }
    Ok(())
}
