use namegame::output;
use namegame::roster::{Command, Roster};
use namegame::source::parse_person_list;
use std::error::Error;

const BODY: &str = r#"[
  {"firstName": "Viju", "lastName": "Legard", "headshot": {"url": "//images.example.com/viju.jpg"}},
  {"firstName": "Matt", "lastName": "Seibert", "headshot": {"url": "//images.example.com/matt.jpg"}},
  {"firstName": "Amy", "lastName": "Zane", "headshot": {"url": "//images.example.com/amy.jpg"}}
]"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut roster = Roster::new();
    roster.on_fetch_complete(parse_person_list(BODY, "https:")?)?;

    for line in ["first", "/ma", "shuffle"] {
        if let Command::Apply(action) = Command::parse(line)? {
            roster.apply(&action);
            println!("== {}", action.label());
            let records = output::build_records(roster.visible());
            print!("{}", String::from_utf8_lossy(&output::render_text(&records, false)));
        }
    }

    Ok(())
}
