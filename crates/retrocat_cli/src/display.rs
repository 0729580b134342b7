//! Plain-text rendering of board, labels and application details.

use retrocat_core::{ApplicantType, Application, Board, Card, CategoryState, FundingAmount, Taxonomy};

pub fn print_board(board: &Board) {
    println!("{} applications: {}", board.view, board.card_count());
    for column in &board.columns {
        print_lane(&column.label, &column.cards);
    }
    print_lane("(uncategorized)", &board.uncategorized);
    print_lane("(flagged)", &board.flagged);
    if !board.orphaned.is_empty() {
        print_lane("(unknown category)", &board.orphaned);
    }
}

fn print_lane(title: &str, cards: &[Card]) {
    println!();
    println!("== {title} [{}]", cards.len());
    for card in cards {
        println!("  {}  {}", card.address, card.title);
    }
}

pub fn print_labels(taxonomy: &Taxonomy, view: ApplicantType) {
    for label in taxonomy.labels_for(view) {
        println!("{label}");
    }
}

pub fn print_outcome(action: &str, app: &Application) {
    println!("{action} {} -> {}", app.applicant_address, describe_state(app));
}

pub fn print_application(app: &Application) {
    println!("{}", app.title());
    println!("  address:  {}", app.applicant_address);
    println!("  type:     {}", app.applicant_type);
    println!("  state:    {}", describe_state(app));
    if let Some(url) = &app.website_url {
        println!("  website:  {url}");
    }
    if let Some(text) = &app.contribution_description {
        println!();
        println!("Contribution");
        println!("{text}");
    }
    if let Some(text) = &app.impact_description {
        println!();
        println!("Impact");
        println!("{text}");
    }
    if let Some(links) = app.contribution_links.as_deref().filter(|links| !links.is_empty()) {
        println!();
        println!("Links");
        for link in links {
            println!(
                "  - {} {}",
                link.kind.as_deref().unwrap_or("LINK"),
                link.url.as_deref().unwrap_or("")
            );
        }
    }
    if let Some(metrics) = app.impact_metrics.as_deref().filter(|metrics| !metrics.is_empty()) {
        println!();
        println!("Metrics");
        for metric in metrics {
            let number = metric
                .number
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  - {number}  {}",
                metric.description.as_deref().unwrap_or("")
            );
        }
    }
    if let Some(sources) = app.funding_sources.as_deref().filter(|sources| !sources.is_empty()) {
        println!();
        println!("Funding");
        for source in sources {
            let amount = match &source.amount {
                Some(FundingAmount::Number(value)) => value.to_string(),
                Some(FundingAmount::Text(value)) => value.clone(),
                None => "-".to_string(),
            };
            println!(
                "  - {} {amount} {}",
                source.kind.as_deref().unwrap_or("SOURCE"),
                source.currency.as_deref().unwrap_or("")
            );
        }
    }
}

fn describe_state(app: &Application) -> String {
    match app.state() {
        CategoryState::Uncategorized => "uncategorized".to_string(),
        CategoryState::Categorized(label) => format!("category `{label}`"),
        CategoryState::Flagged(reason) if reason.is_empty() => "flagged".to_string(),
        CategoryState::Flagged(reason) => format!("flagged: {reason}"),
    }
}
