//! Sub-command dispatch
//!
//! Every command is one view operation followed by printing that view's
//! status line and rendered nodes.

use anyhow::Context;
use booking_client::ui::{AvailabilityForm, ReservationForm, ReservationTab, TableForm};
use booking_client::view::{Node, StatusRegion};
use booking_client::{App, AssumeYes, Confirm};
use shared::RestaurantCreate;

use crate::cli::{Command, ReservationCommand, RestaurantCommand, SlotArgs, TableCommand};
use crate::prompt::password_or_ask;

/// Run one command. `Ok(false)` means the operation failed or was declined.
///
/// `prompt` answers destructive confirmations unless `--yes` was given.
pub async fn run(app: &mut App, command: Command, prompt: &dyn Confirm) -> anyhow::Result<bool> {
    let ok = match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_ask(password).context("failed to read password")?;
            let ok = app.register(&name, &email, &password).await;
            report(ok, app.auth.status(), None)
        }
        Command::Login { email, password } => {
            let password = password_or_ask(password).context("failed to read password")?;
            let ok = app.login(&email, &password).await;
            report(ok, app.auth.status(), None)
        }
        Command::Logout => {
            app.logout().await;
            report(true, app.auth.status(), None)
        }
        Command::Whoami => match app.header() {
            Some(badge) => {
                print!("{}", badge.render_text());
                true
            }
            None => {
                eprintln!("Not logged in");
                false
            }
        },
        Command::Restaurants(cmd) => restaurants(app, cmd, prompt).await,
        Command::Tables(cmd) => tables(app, cmd).await,
        Command::Availability {
            restaurant_id,
            slot,
        } => {
            let form = AvailabilityForm {
                restaurant_id,
                start_time: slot.start,
                end_time: slot.end,
                guests: slot.guests,
            };
            let ok = app.reservations.check_availability(&form).await;
            report(
                ok,
                app.reservations.status(),
                app.reservations.render_availability(),
            )
        }
        Command::Reservations(cmd) => {
            if !logged_in(app) {
                return Ok(false);
            }
            reservations(app, cmd, prompt).await
        }
        Command::Health => {
            let ok = app.health().await;
            report(ok, app.global_status(), None)
        }
    };
    Ok(ok)
}

async fn restaurants(app: &mut App, cmd: RestaurantCommand, prompt: &dyn Confirm) -> bool {
    match cmd {
        RestaurantCommand::List => {
            let ok = app.restaurants.list().await;
            report(ok, app.restaurants.status(), app.restaurants.render())
        }
        RestaurantCommand::Show { id } => {
            let ok = app.restaurants.show(&id).await;
            report(ok, app.restaurants.status(), app.restaurants.render_detail())
        }
        RestaurantCommand::Create {
            name,
            address,
            open,
            close,
        } => {
            if !logged_in(app) {
                return false;
            }
            let form = RestaurantCreate {
                name,
                address,
                open_time: open,
                close_time: close,
            };
            let ok = app.restaurants.create(&form).await;
            report(ok, app.restaurants.status(), app.restaurants.render())
        }
        RestaurantCommand::Delete { id, yes } => {
            if !logged_in(app) {
                return false;
            }
            // 先加载列表以取得名称用于确认提示
            app.restaurants.list().await;
            let name = app.restaurants.name_of(&id).unwrap_or(&id).to_string();
            let ok = app
                .restaurants
                .delete(&id, &name, confirmer(yes, prompt))
                .await;
            report(ok, app.restaurants.status(), app.restaurants.render())
        }
    }
}

async fn tables(app: &mut App, cmd: TableCommand) -> bool {
    match cmd {
        TableCommand::List { restaurant_id } => {
            let ok = app.tables.list(&restaurant_id).await;
            report(ok, app.tables.status(), app.tables.render())
        }
        TableCommand::Create {
            restaurant_id,
            name,
            capacity,
        } => {
            if !logged_in(app) {
                return false;
            }
            let form = TableForm { name, capacity };
            let ok = app.tables.create(&restaurant_id, &form).await;
            report(ok, app.tables.status(), app.tables.render())
        }
    }
}

async fn reservations(app: &mut App, cmd: ReservationCommand, prompt: &dyn Confirm) -> bool {
    match cmd {
        ReservationCommand::Create {
            restaurant_id,
            table,
            slot: SlotArgs { start, end, guests },
        } => {
            let form = ReservationForm {
                restaurant_id,
                table_id: table.unwrap_or_default(),
                start_time: start,
                end_time: end,
                guests,
            };
            let ok = app.reservations.create(&form).await;
            report(ok, app.reservations.status(), None)
        }
        ReservationCommand::Mine => {
            app.reservations.show_tab(ReservationTab::Mine).await;
            let ok = !app.reservations.status().is_error();
            report(ok, app.reservations.status(), app.reservations.render())
        }
        ReservationCommand::Cancel { id, yes } => {
            let ok = app
                .reservations
                .cancel(&id, confirmer(yes, prompt))
                .await;
            report(ok, app.reservations.status(), app.reservations.render())
        }
    }
}

fn confirmer(yes: bool, prompt: &dyn Confirm) -> &dyn Confirm {
    if yes { &AssumeYes } else { prompt }
}

fn logged_in(app: &App) -> bool {
    let ok = app.session().is_authenticated();
    if !ok {
        eprintln!("Please log in first");
    }
    ok
}

/// Line to print for an outcome, and whether it belongs on stderr
fn feedback(ok: bool, status: &StatusRegion) -> Option<(bool, String)> {
    match status.line() {
        Some(line) => Some((line.is_error(), line.to_string())),
        None if !ok => Some((true, "Aborted".to_string())),
        None => None,
    }
}

/// Print the status line (errors to stderr) and the rendered nodes
fn report(ok: bool, status: &StatusRegion, node: Option<Node>) -> bool {
    match feedback(ok, status) {
        Some((true, line)) => eprintln!("{}", line),
        Some((false, line)) => println!("{}", line),
        None => {}
    }
    if let Some(node) = node {
        print!("{}", node.render_text());
    }
    ok
}
