use colored::Colorize;
use log::debug;

use taskboard::{
  notify::ToastQueue, session, storage::JsonFileStorage, task::TaskId, viewer::Viewer, Config,
  Dashboard, Error,
};

fn main() {
  env_logger::init();

  let matches = clap::Command::new("taskboard")
    .arg_required_else_help(true)
    .subcommand(clap::Command::new("login").args(&[
      clap::Arg::new("name").required(true).index(1),
      clap::Arg::new("email").required(true).index(2),
    ]))
    .subcommand(clap::Command::new("whoami"))
    .subcommand(clap::Command::new("list"))
    .subcommand(
      clap::Command::new("add")
        .arg(clap::Arg::new("text").required(true).index(1).multiple_values(true)),
    )
    .subcommand(clap::Command::new("edit").args(&[
      clap::Arg::new("id").required(true).index(1),
      clap::Arg::new("text").required(true).index(2).multiple_values(true),
    ]))
    .subcommand(clap::Command::new("toggle").arg(clap::Arg::new("id").required(true).index(1)))
    .subcommand(clap::Command::new("delete").arg(clap::Arg::new("id").required(true).index(1)))
    .subcommand(clap::Command::new("logout"))
    .get_matches();

  if let Err(err) = run(&matches) {
    eprintln!("{}", err.to_string().red());
    std::process::exit(1);
  }
}

fn run(matches: &clap::ArgMatches) -> Result<(), Error> {
  let config = Config::new()?;
  let mut storage = JsonFileStorage::new(std::path::Path::new(&config.storage_path))?;
  debug!("storage file: {}", storage.storage_path().display());

  let (subcommand, command_matches) = match matches.subcommand() {
    Some(found) => found,
    None => {
      println!("subcommand not found");
      return Ok(());
    }
  };

  if subcommand == "login" {
    let name = command_matches.value_of("name").unwrap_or_default();
    let email = command_matches.value_of("email").unwrap_or_default();
    session::begin(&mut storage, name, email)?;
    println!("logged in as {} <{}>", name.bold(), email);
    return Ok(());
  }

  let viewer = Viewer::new();
  let toasts = ToastQueue::new();
  let mut dashboard = match Dashboard::open(Box::new(storage), Box::new(toasts.clone())) {
    Ok(dashboard) => dashboard.with_logout_delay(config.logout_redirect()),
    Err(redirect) => {
      println!("not logged in, continue at {}", redirect.route.path());
      return Ok(());
    }
  };
  dashboard.mount();

  match subcommand {
    "whoami" => {
      viewer.print_header(dashboard.identity());
      return Ok(());
    }
    "list" => {}
    "add" => {
      dashboard.set_input(&joined_text(command_matches));
      submit(&mut dashboard);
    }
    "edit" => {
      let id: TaskId = command_matches.value_of_t_or_exit("id");
      if dashboard.begin_edit(id) {
        dashboard.set_input(&joined_text(command_matches));
        submit(&mut dashboard);
      } else {
        println!("task with id: {} not found", id);
      }
    }
    "toggle" => {
      let id: TaskId = command_matches.value_of_t_or_exit("id");
      if dashboard.toggle_complete(id).is_none() {
        println!("task with id: {} not found", id);
      }
    }
    "delete" => {
      let id: TaskId = command_matches.value_of_t_or_exit("id");
      if dashboard.delete(id).is_none() {
        println!("task with id: {} not found", id);
      }
    }
    "logout" => {
      let redirect = dashboard.logout();
      viewer.print_toasts(&toasts.drain());
      std::thread::sleep(redirect.after);
      println!("continue at {}", redirect.route.path());
      return Ok(());
    }
    unknown => {
      println!("unknown subcommand {}", unknown);
      return Ok(());
    }
  };

  viewer.print_toasts(&toasts.drain());
  viewer.print_header(dashboard.identity());
  viewer.print_tasks(dashboard.tasks());
  Ok(())
}

fn joined_text(matches: &clap::ArgMatches) -> String {
  matches
    .values_of("text")
    .map(|values| values.collect::<Vec<&str>>().join(" "))
    .unwrap_or_default()
}

fn submit(dashboard: &mut Dashboard) {
  if let Err(err) = dashboard.submit() {
    debug!("submit rejected: {}", err);
  }
}
