use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use msu_timetable::notification::{self, DEFAULT_TIMEZONE};
use msu_timetable::teacher::{self, find_by_display_name, search};
use msu_timetable::{
    annotate_days, annotate_teachers, build_free_room_grid, days_from_document, group,
    lessons_from_document, week, week_dates_from_lessons, FreeRoomsDocument, FreeRoomsSnapshot,
    GroupId, GroupScheduleDocument, DAYS_PER_WEEK,
};

/// Reconcile exported timetable documents into lesson and free-room snapshots.
///
/// Document arguments take a JSON file path, or `-` to read stdin.
#[derive(Debug, Parser)]
#[command(name = "msu-timetable", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a group schedule document into five lessons per day.
    Schedule {
        /// Group schedule document (`{"days": ...}`).
        document: PathBuf,

        /// Print one time-sorted lesson list plus the week's dates instead of days.
        #[arg(long)]
        flat: bool,

        /// Free-rooms document used by `--smart`.
        #[arg(long)]
        free_rooms: Option<PathBuf>,

        /// Show free rooms in gaps next to and between lessons.
        #[arg(long, requires = "free_rooms")]
        smart: bool,
    },

    /// Build the 7 × 5 free-room grid.
    FreeRooms {
        /// Free-rooms document (`{"schedule": ..., "last_update": ...}`).
        document: PathBuf,

        /// Only print one day (0 = Monday).
        #[arg(long)]
        day: Option<usize>,
    },

    /// Resolve a teacher collection, sorted by name.
    Teachers {
        /// Teacher collection (object keyed by teacher id).
        document: PathBuf,

        /// Keep only teachers whose name contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Print the single teacher with this display name.
        #[arg(long, conflicts_with = "search")]
        name: Option<String>,

        /// Free-rooms document used by `--smart`.
        #[arg(long)]
        free_rooms: Option<PathBuf>,

        /// Show free rooms in gaps next to and between lessons.
        #[arg(long, requires = "free_rooms")]
        smart: bool,
    },

    /// Print the dates of the current or next week.
    Week {
        /// Anchor date (YYYY-MM-DD). Defaults to the local date.
        #[arg(long)]
        today: Option<String>,

        /// Use the following week.
        #[arg(long)]
        next_week: bool,
    },

    /// Decode a notification collection, newest first.
    Notifications {
        /// Notification collection (list, or object keyed by id).
        document: PathBuf,

        /// IANA timezone for displayed dates.
        #[arg(long, env = "MSU_TIMETABLE_TZ", default_value = DEFAULT_TIMEZONE)]
        timezone: String,
    },

    /// Print the store identifier of a faculty/course group.
    Group {
        /// Faculty code, e.g. `pmi`.
        faculty: String,

        /// Course number (1-4).
        course: u32,
    },
}

fn main() -> Result<()> {
    // Level is controlled by RUST_LOG (e.g. RUST_LOG=msu_timetable=debug).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    debug!(command = ?cli.command, "parsed arguments");
    run(cli.command)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Schedule {
            document,
            flat,
            free_rooms,
            smart,
        } => {
            let doc = GroupScheduleDocument::from_json(&read_input(&document)?)
                .with_context(|| format!("parsing schedule {}", document.display()))?;

            if flat {
                let lessons = lessons_from_document(&doc);
                let week_dates = week_dates_from_lessons(&lessons);
                return print_json(&json!({ "lessons": lessons, "week_dates": week_dates }));
            }

            let mut days = days_from_document(&doc);
            if smart {
                let snapshot = load_free_rooms(free_rooms.as_deref())?;
                days = annotate_days(days, &snapshot);
            }
            info!(days = days.len(), smart, "resolved schedule");
            print_json(&days)
        }

        Command::FreeRooms { document, day } => {
            let grid = build_free_room_grid(&load_free_rooms(Some(document.as_path()))?);
            match day {
                Some(index) => {
                    let Some(day) = grid.days.get(index) else {
                        bail!("day {index} is out of range 0..{DAYS_PER_WEEK}");
                    };
                    print_json(day)
                }
                None => print_json(&grid),
            }
        }

        Command::Teachers {
            document,
            search: query,
            name,
            free_rooms,
            smart,
        } => {
            let mut teachers = teacher::teachers_from_json(&read_input(&document)?)
                .with_context(|| format!("parsing teachers {}", document.display()))?;
            if smart {
                let snapshot = load_free_rooms(free_rooms.as_deref())?;
                teachers = annotate_teachers(teachers, &snapshot);
            }
            info!(teachers = teachers.len(), smart, "resolved teachers");

            if let Some(name) = name {
                return print_json(&find_by_display_name(&teachers, &name));
            }
            print_json(&search(&teachers, query.as_deref().unwrap_or("")))
        }

        Command::Week { today, next_week } => {
            let today = match today {
                Some(text) => week::parse_date(&text)?,
                None => chrono::Local::now().date_naive(),
            };
            print_json(&json!({
                "dates": week::week_date_strings(today, next_week),
                "today_index": week::day_index(today),
            }))
        }

        Command::Notifications { document, timezone } => {
            let tz = notification::parse_timezone(&timezone)?;
            let list = notification::notifications_from_json(&read_input(&document)?, &tz)
                .with_context(|| format!("parsing notifications {}", document.display()))?;
            print_json(&json!({
                "unread": notification::unread_count(&list),
                "notifications": list,
            }))
        }

        Command::Group { faculty, course } => {
            let id = GroupId::checked(&faculty, course)?;
            print_json(&json!({
                "id": id.to_string(),
                "faculty": group::faculty_name(&id.faculty_code),
                "path": id.schedule_path(),
            }))
        }
    }
}

fn load_free_rooms(path: Option<&Path>) -> Result<FreeRoomsSnapshot> {
    let Some(path) = path else {
        bail!("--smart needs --free-rooms");
    };
    let doc = FreeRoomsDocument::from_json(&read_input(path)?)
        .with_context(|| format!("parsing free rooms {}", path.display()))?;
    Ok(FreeRoomsSnapshot::from_document(&doc))
}

/// Read a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}
