use namegame::roster::Roster;
use namegame::source::{DataSource, SourceOptions};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let source = DataSource::new(SourceOptions {
        timeout_seconds: 5,
        ..SourceOptions::default()
    })?;
    let people = source.fetch_person_list().await?;

    let mut roster = Roster::new();
    roster.on_fetch_complete(people)?;
    roster.on_sort_last();

    println!("People: {}", roster.full_list().len());
    for p in roster.visible().iter().take(10) {
        println!("{} {} {}", p.last_name, p.first_name, p.headshot_url);
    }

    Ok(())
}
