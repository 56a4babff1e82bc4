// hrops-client/examples/roll_off_console.rs
// Search a roll-off record from the command line and print it with
// resolved lookup labels.

use hrops_client::{ClientConfig, FormController};
use shared::lookup::category;
use shared::pages;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <employee_no_or_user_code>", args[0]);
        println!("  Example: {} E100", args[0]);
        return Ok(());
    }
    let identifier = &args[1];

    let base_url =
        std::env::var("HROPS_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    let client = ClientConfig::new(&base_url).build_http_client();
    let mut page = FormController::new(&pages::ROLL_OFF, client);

    page.load_lookups().await?;

    match page.search(identifier, identifier).await {
        Ok(outcome) => tracing::info!(?outcome, "Search finished"),
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            return Err(e.into());
        }
    }

    if let Some(record) = page.record() {
        println!("Employee No : {}", record.text("EMPLOYEENO").unwrap_or("TBD"));
        println!("Name        : {}", record.text("EMPLOYEENAME").unwrap_or("TBD"));
        println!(
            "Service line: {}",
            page.resolved(category::SERVICE_LINE, "SERVICELINEID")
        );
        println!(
            "Location    : {}",
            page.resolved(category::BASE_LOCATION, "BASELOCATIONID")
        );
        println!(
            "Status gate : {:?} (edit {})",
            page.status(),
            if page.gate_open() { "enabled" } else { "disabled" }
        );
    }

    Ok(())
}
