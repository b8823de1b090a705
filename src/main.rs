use anyhow::{Context, Result};
use chrono::Utc;
use democal::core::cli::{CliArgs, Command};
use democal::core::context::AppContext;
use democal::core::models::ScheduledInterval;
use democal::logging::LogTarget;
use democal::scheduler::Scheduler;
use democal::scheduler::calendar_view::CalendarView;
use democal::ui::display_manager::DisplayManager;

fn main() {
    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = run(args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut ctx = AppContext::new_with_paths(&args.paths)?;
    let display = DisplayManager::new();

    match args.command {
        Command::Agenda { demos, now } => {
            ctx.load_demos(&demos)
                .with_context(|| format!("Failed to load demos from {}", demos.display()))?;
            let scheduler = Scheduler::new(&ctx.config, &ctx.logger)?;
            let now = now.unwrap_or_else(Utc::now);
            let entries = scheduler.agenda(&ctx.demos, now);
            display.print(|d, out| d.render_agenda(&entries, now, out));
        }
        Command::Week { demos, date, now } => {
            ctx.load_demos(&demos)
                .with_context(|| format!("Failed to load demos from {}", demos.display()))?;
            let now = now.unwrap_or_else(Utc::now);
            let view = CalendarView::week_of(date.unwrap_or_else(|| now.date_naive()));
            let columns = view.columns(&ctx.demos);
            display.print(|d, out| d.render_week(&columns, now, out));
        }
        Command::Conflicts {
            demos,
            start,
            minutes,
            exclude,
        } => {
            ctx.load_demos(&demos)
                .with_context(|| format!("Failed to load demos from {}", demos.display()))?;
            let scheduler = Scheduler::new(&ctx.config, &ctx.logger)?;
            let candidate = ScheduledInterval::new(start, minutes)?;
            let conflicts = scheduler.check_local(&candidate, &ctx.demos, exclude.as_deref());
            let suggestion = scheduler.suggest(&candidate, &ctx.demos, exclude.as_deref())?;
            display.print(|d, out| d.render_conflicts(&candidate, &conflicts, &suggestion, out));
        }
        Command::Slot { y, date } => {
            let scheduler = Scheduler::new(&ctx.config, &ctx.logger)?;
            let slot = scheduler.geometry().pixel_to_time(y);
            let on_date = date.map(|d| slot.on_date(d)).transpose()?;
            display.print(|d, out| d.render_slot(y, slot, on_date, out));
        }
        Command::Config { set: None } => {
            display.print(|d, out| d.render_config(&ctx.config, out));
        }
        Command::Config {
            set: Some((key, value)),
        } => {
            ctx.config
                .set(&key, &value)
                .with_context(|| format!("Could not set {key}"))?;
            if let Some((key, old, new)) = ctx.config.take_last_change() {
                let message = format!("{key}: {old} -> {new}");
                ctx.logger.info(&message, LogTarget::FileOnly);
                println!("{message}");
            }
        }
    }
    Ok(())
}
