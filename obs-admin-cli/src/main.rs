use clap::{Parser, Subcommand};
use obs_admin_core::{
    AdminConfig, AdminError, Direction, GridSortOrder, InventoryRequest, InventoryType,
    PaginatedGrid, inventory_grid, inventory_service, item_grid, item_service,
};

#[derive(Parser)]
#[command(name = "obs-admin")]
#[command(about = "Back-office console for the OBS item and inventory service")]
struct Cli {
    /// Backend base url (overrides OBS_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the item catalogue
    Items {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Record and inspect stock movements
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },
}

#[derive(Subcommand)]
enum ItemCommands {
    /// List one page of items
    List {
        #[arg(long, default_value = "0")]
        page: usize,
        #[arg(long, default_value = "5")]
        size: usize,
        /// Only items whose name matches
        #[arg(long)]
        filter: Option<String>,
        /// Sort column, e.g. `price` or `price:desc`
        #[arg(long)]
        sort: Option<String>,
    },
    /// Create an item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
    },
    /// Rename or reprice an item
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
    },
    /// Delete an item
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum InventoryCommands {
    /// List one page of stock movements
    List {
        #[arg(long, default_value = "0")]
        page: usize,
        #[arg(long, default_value = "5")]
        size: usize,
        /// Only movements of this item id
        #[arg(long)]
        item: Option<String>,
    },
    /// Record a top-up (T) or withdrawal (W)
    Record {
        #[arg(long)]
        item: i64,
        #[arg(long)]
        quantity: i64,
        #[arg(long = "type", default_value = "W")]
        kind: InventoryType,
    },
    /// Totals for one item
    Summary {
        #[arg(long)]
        item: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AdminConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    log::debug!("Using backend at {}", config.base_url);
    obs_admin_core::initialize(config);

    let result = match cli.command {
        Commands::Items { command } => run_items(command),
        Commands::Inventory { command } => run_inventory(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

fn run_items(command: ItemCommands) -> Result<(), AdminError> {
    match command {
        ItemCommands::List {
            page,
            size,
            filter,
            sort,
        } => {
            let mut grid = item_grid();
            if let Some(sort) = sort {
                grid.set_sort_order_quiet(vec![parse_sort(&sort)]);
            }
            grid.set_filter_text(filter.as_deref());
            grid.load_page_sized(page, size)?;
            print!("{}", render_grid(&grid));
        }
        ItemCommands::Add { name, price } => {
            check_item_fields(&name, price)?;
            item_service()?.create_item(name.trim(), price as i64)?;
            println!("Item added!");
        }
        ItemCommands::Update { id, name, price } => {
            check_item_fields(&name, price)?;
            item_service()?.update_item(id, name.trim(), price as i64)?;
            println!("Update Operation Completed");
        }
        ItemCommands::Delete { id } => {
            item_service()?.delete_item(id)?;
            println!("Item deleted");
        }
    }
    Ok(())
}

fn run_inventory(command: InventoryCommands) -> Result<(), AdminError> {
    match command {
        InventoryCommands::List { page, size, item } => {
            let mut grid = inventory_grid();
            grid.set_filter_text(item.as_deref());
            grid.load_page_sized(page, size)?;
            print!("{}", render_grid(&grid));
        }
        InventoryCommands::Record {
            item,
            quantity,
            kind,
        } => {
            if quantity < 1 {
                return Err(AdminError::Validation(
                    "Please fill all required fields".to_string(),
                ));
            }
            inventory_service()?.save_inventory(&InventoryRequest {
                item_id: item,
                quantity,
                kind,
            })?;
            println!("Inventory saved");
        }
        InventoryCommands::Summary { item } => {
            let summary = inventory_service()?.get_summary_by_item_id(&item)?;
            println!("Item ID:         {}", summary.item_id);
            println!("Item Name:       {}", summary.item_name);
            println!("Total Top-Up:    {}", summary.total_top_up);
            println!("Total Withdraw:  {}", summary.total_withdraw);
            println!("Remaining Stock: {}", summary.remaining_stock);
            println!("Top-Up Count:    {}", summary.top_up_count);
            println!("Withdraw Count:  {}", summary.withdraw_count);
        }
    }
    Ok(())
}

fn check_item_fields(name: &str, price: f64) -> Result<(), AdminError> {
    if name.trim().is_empty() || price.is_nan() || price < 0.0 {
        return Err(AdminError::Validation(
            "Please fill all fields correctly".to_string(),
        ));
    }
    Ok(())
}

/// `price` sorts ascending, `price:desc` descending
fn parse_sort(text: &str) -> GridSortOrder {
    match text.rsplit_once(':') {
        Some((column, dir)) if dir.eq_ignore_ascii_case("desc") => {
            GridSortOrder::new(column, Direction::Descending)
        }
        Some((column, dir)) if dir.eq_ignore_ascii_case("asc") => {
            GridSortOrder::new(column, Direction::Ascending)
        }
        _ => GridSortOrder::new(text, Direction::Ascending),
    }
}

/// `Page n of total`, a header line and one line per row, columns padded to fit
fn render_grid<T>(grid: &PaginatedGrid<T>) -> String {
    let headers: Vec<String> = grid
        .columns()
        .iter()
        .map(|c| c.header().unwrap_or("").to_string())
        .collect();
    let rows: Vec<Vec<String>> = (0..grid.rows().len())
        .map(|r| {
            (0..headers.len())
                .map(|c| grid.cell_text(r, c).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|c| {
            rows.iter()
                .map(|row| row[c].chars().count())
                .chain(std::iter::once(headers[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = format!("{}\n", grid.pagination().page_info());
    out.push_str(&line(&headers));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use obs_admin_core::{Page, PageRequest};

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_sort("price:desc"),
            GridSortOrder::new("price", Direction::Descending)
        );
        assert_eq!(
            parse_sort("name:ASC"),
            GridSortOrder::new("name", Direction::Ascending)
        );
        assert_eq!(
            parse_sort("createdDate"),
            GridSortOrder::new("createdDate", Direction::Ascending)
        );
    }

    #[test]
    fn test_render_grid() {
        let mut grid: PaginatedGrid<(i64, &'static str)> =
            PaginatedGrid::new(|request: &PageRequest, _: &str| {
                Ok(Page::new(vec![(1, "Widget"), (22, "Bolt")], request, 7))
            });
        grid.add_column(|r: &(i64, &str)| r.0.to_string(), "ID");
        grid.add_column(|r: &(i64, &str)| r.1.to_string(), "Name");
        grid.load_page_sized(1, 2).unwrap();

        assert_eq!(
            render_grid(&grid),
            "Page 2 of 4\nID | Name\n1  | Widget\n22 | Bolt\n"
        );
    }

    #[test]
    fn test_item_fields_validation() {
        assert!(check_item_fields("Widget", 0.0).is_ok());
        assert!(check_item_fields("  ", 3.0).is_err());
        assert!(check_item_fields("Widget", -1.0).is_err());
        assert!(check_item_fields("Widget", f64::NAN).is_err());
    }
}
