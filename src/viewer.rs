use colored::Colorize;

use crate::{
  identity::IdentityContext,
  notify::{Level, Notification},
  task::Task,
  traits::Indexable,
};

pub const EMPTY_LIST_MSG: &str = "No tasks yet — add one above!";

pub struct Viewer {}

impl Viewer {
  pub fn new() -> Self {
    return Self {};
  }

  pub fn print_header(&self, identity: &IdentityContext) {
    println!("{}", self.format_header(identity));
  }

  pub fn print_tasks(&self, tasks: &[Task]) {
    if tasks.is_empty() {
      println!("{}", EMPTY_LIST_MSG.italic().dimmed());
      return;
    }

    for task in tasks.iter() {
      println!("{}", self.format_task(task));
    }
  }

  pub fn print_toasts(&self, toasts: &[Notification]) {
    for toast in toasts.iter() {
      println!("{}", self.format_toast(toast));
    }
  }

  pub fn format_header(&self, identity: &IdentityContext) -> String {
    format!(
      "{} {} <{}>",
      "My Dashboard".bold().blue(),
      identity.name().unwrap_or("unknown").bold(),
      identity.email().unwrap_or("no email").dimmed()
    )
  }

  pub fn format_task(&self, task: &Task) -> String {
    let mark = match task.completed() {
      true => "[x]".green(),
      false => "[ ]".normal(),
    };
    let text = match task.completed() {
      true => task.text().strikethrough().dimmed(),
      false => task.text().bold(),
    };

    format!(
      "{padding}{id}  {mark} {text}",
      padding = " ".repeat(2),
      id = task.id().to_string().yellow(),
      mark = mark,
      text = text
    )
  }

  pub fn format_toast(&self, toast: &Notification) -> String {
    match toast.level {
      Level::Success => format!("{} {}", "✓".green(), toast.message),
      Level::Error => format!("{} {}", "✗".red(), toast.message.red()),
      Level::Warning => format!("{} {}", "!".yellow(), toast.message.yellow()),
    }
  }
}

impl Default for Viewer {
  fn default() -> Self {
    Self::new()
  }
}
