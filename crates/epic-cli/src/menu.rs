//! Numbered menus between commands.

use crate::{
  Error, Result,
  command::{Action, Entity, Nav},
  input,
  term::{Notice, Terminal},
};

const START_ITEMS: [(&str, Nav); 6] = [
  ("Employees", Nav::Menu(Entity::Employee)),
  ("Clients", Nav::Menu(Entity::Client)),
  ("Contracts", Nav::Menu(Entity::Contract)),
  ("Events", Nav::Menu(Entity::Event)),
  ("Quit", Nav::Quit),
  ("Logout", Nav::Logout),
];

/// Show numbered `items` and read a number until it names one of them.
/// A blank answer yields `on_blank`.
fn pick(
  term: &mut dyn Terminal,
  title: &str,
  items: &[(String, Nav)],
  on_blank: Nav,
) -> Result<Nav> {
  let rows: Vec<Vec<String>> = items
    .iter()
    .enumerate()
    .map(|(i, (label, _))| vec![format!("[{}]", i + 1), label.clone()])
    .collect();
  term.render_table(Some(title), &[], &rows);

  loop {
    let answer = match input::ask(term, "Your choice?") {
      Ok(answer) => answer,
      Err(Error::Cancelled) => return Ok(on_blank),
      Err(e) => return Err(e),
    };
    let picked = answer
      .parse::<usize>()
      .ok()
      .and_then(|n| n.checked_sub(1))
      .and_then(|i| items.get(i));
    match picked {
      Some((_, nav)) => return Ok(*nav),
      None => {
        term.notify(Notice::Error, &format!("Invalid choice! [1-{}]", items.len()));
      }
    }
  }
}

/// The top-level menu. Blank input quits.
pub fn start_menu(term: &mut dyn Terminal) -> Result<Nav> {
  let items: Vec<(String, Nav)> =
    START_ITEMS.iter().map(|(label, nav)| ((*label).to_owned(), *nav)).collect();
  pick(term, "Main menu", &items, Nav::Quit)
}

/// The actions on one entity, then "Back". Blank input goes back.
pub fn entity_menu(term: &mut dyn Terminal, entity: Entity) -> Result<Nav> {
  let mut items: Vec<(String, Nav)> = Action::ALL
    .iter()
    .map(|action| {
      (format!("{} {}", action.label(), entity.plural().to_lowercase()), Nav::Run(entity, *action))
    })
    .collect();
  items.push(("Back".to_owned(), Nav::Start));
  pick(term, &format!("{} menu", entity.label()), &items, Nav::Start)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::term::ScriptedTerminal;

  #[test]
  fn start_menu_numbers() {
    let expected = [
      ("1", Nav::Menu(Entity::Employee)),
      ("2", Nav::Menu(Entity::Client)),
      ("3", Nav::Menu(Entity::Contract)),
      ("4", Nav::Menu(Entity::Event)),
      ("5", Nav::Quit),
      ("6", Nav::Logout),
    ];
    for (answer, nav) in expected {
      let mut term = ScriptedTerminal::new([answer]);
      assert_eq!(start_menu(&mut term).unwrap(), nav);
    }
  }

  #[test]
  fn start_menu_reprompts_until_listed() {
    let mut term = ScriptedTerminal::new(["0", "7", "two", "2"]);
    assert_eq!(start_menu(&mut term).unwrap(), Nav::Menu(Entity::Client));
    assert_eq!(term.prompts.len(), 4);
    assert!(term.saw(Notice::Error, "Invalid choice! [1-6]"));
  }

  #[test]
  fn blank_quits_start_menu() {
    let mut term = ScriptedTerminal::new([""]);
    assert_eq!(start_menu(&mut term).unwrap(), Nav::Quit);
  }

  #[test]
  fn entity_menu_maps_actions() {
    let mut term = ScriptedTerminal::new(["3"]);
    assert_eq!(
      entity_menu(&mut term, Entity::Contract).unwrap(),
      Nav::Run(Entity::Contract, Action::Update)
    );
    let table = term.last_table().unwrap();
    assert_eq!(table.title.as_deref(), Some("Contract menu"));
    assert_eq!(table.rows[0], ["[1]", "List contracts"]);
    assert_eq!(table.rows[4], ["[5]", "Back"]);
  }

  #[test]
  fn entity_menu_back_and_blank() {
    let mut term = ScriptedTerminal::new(["5"]);
    assert_eq!(entity_menu(&mut term, Entity::Event).unwrap(), Nav::Start);
    let mut term = ScriptedTerminal::new([" "]);
    assert_eq!(entity_menu(&mut term, Entity::Event).unwrap(), Nav::Start);
  }
}
