use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use liftlog_core::calendar::meal_log_block;
use liftlog_core::export::{export_meals, export_sets};
use liftlog_core::history::recent_sets;
use liftlog_core::insights::{exercise_summary, weekly_nutrition};
use liftlog_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Personal workout and meal tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a weight between kg and lbs
    #[command(group(ArgGroup::new("direction").required(true).args(["to", "from"])))]
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Treat VALUE as kg and convert to this unit
        #[arg(long)]
        to: Option<WeightUnit>,

        /// Treat VALUE as this unit and convert to kg
        #[arg(long)]
        from: Option<WeightUnit>,
    },

    /// Classify raw rep counts without touching the log
    Classify {
        /// Reps per set this session, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        current: Vec<i32>,

        /// Reps per set last session at the same weight
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        previous: Vec<i32>,

        /// Rep ceiling
        #[arg(long, allow_negative_numbers = true)]
        target: i32,

        /// Sessions held at this weight, including this one
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        sessions: i32,

        #[arg(long)]
        json: bool,
    },

    /// Log one completed set
    LogSet {
        exercise: String,
        weight: f64,
        reps: i32,

        /// Unit WEIGHT is given in (defaults to your preferred unit)
        #[arg(long)]
        unit: Option<WeightUnit>,

        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Allow an exercise that is not in the catalog
        #[arg(long)]
        custom: bool,
    },

    /// Progressive overload status for an exercise
    Status {
        exercise: String,

        /// Override the rep ceiling
        #[arg(long)]
        target: Option<i32>,

        #[arg(long)]
        json: bool,
    },

    /// Recent totals for an exercise
    Summary { exercise: String },

    /// Log a meal (weekdays only, never in the future)
    LogMeal {
        name: String,

        #[arg(long)]
        calories: f64,

        #[arg(long, default_value = "snack")]
        meal: MealKind,

        #[arg(long)]
        protein: Option<f64>,

        #[arg(long)]
        carbs: Option<f64>,

        #[arg(long)]
        fat: Option<f64>,

        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Show the meal log for a Monday-Friday week
    Week {
        /// Weeks from the current one (negative for past weeks)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },

    /// Show or set the preferred weight unit
    Unit { unit: Option<WeightUnit> },

    /// List known exercises and their rep ranges
    Exercises,

    /// Export sets and meals to CSV
    Export {
        #[arg(long)]
        out: PathBuf,

        /// Weight unit for the sets file (defaults to your preferred unit)
        #[arg(long)]
        unit: Option<WeightUnit>,
    },
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date_key(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        liftlog_core::logging::init_with_level("debug");
    } else {
        liftlog_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };
    // Config is read only by commands that touch the data directory
    let open = || open_store(cli.data_dir.clone(), cli.config.as_deref());

    match cli.command {
        Commands::Convert { value, to, from } => cmd_convert(value, to, from),
        Commands::Classify {
            current,
            previous,
            target,
            sessions,
            json,
        } => cmd_classify(&current, &previous, target, sessions, json),
        Commands::LogSet {
            exercise,
            weight,
            reps,
            unit,
            date,
            custom,
        } => {
            let (_, store) = open()?;
            let store = if custom {
                store
            } else {
                store.with_catalog(default_catalog())
            };
            let date = date.unwrap_or_else(|| clock.today());
            cmd_log_set(&store, &exercise, weight, reps, unit, date)
        }
        Commands::Status {
            exercise,
            target,
            json,
        } => {
            let (config, store) = open()?;
            cmd_status(&store, &config, &exercise, target, json)
        }
        Commands::Summary { exercise } => {
            let (config, store) = open()?;
            cmd_summary(&store, &config, &exercise, clock.today())
        }
        Commands::LogMeal {
            name,
            calories,
            meal,
            protein,
            carbs,
            fat,
            date,
        } => {
            let (_, store) = open()?;
            let today = clock.today();
            let new_meal = NewMeal {
                date: date.unwrap_or(today),
                kind: meal,
                name,
                calories,
                protein_g: protein,
                carbs_g: carbs,
                fat_g: fat,
            };
            cmd_log_meal(&store, new_meal, today)
        }
        Commands::Week { offset } => {
            let (_, store) = open()?;
            cmd_week(&store, offset, clock.today())
        }
        Commands::Unit { unit } => {
            let (_, store) = open()?;
            cmd_unit(&store, unit)
        }
        Commands::Exercises => cmd_exercises(),
        Commands::Export { out, unit } => {
            let (_, store) = open()?;
            cmd_export(&store, out, unit)
        }
    }
}

/// Load the config and open the store it points at
fn open_store(
    data_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<(Config, LogStore)> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let store = LogStore::open(&data_dir).with_default_unit(config.units.default_unit);
    tracing::debug!("Using data directory {:?}", store.data_dir());
    Ok((config, store))
}

fn cmd_convert(value: f64, to: Option<WeightUnit>, from: Option<WeightUnit>) -> Result<()> {
    match (to, from) {
        (Some(unit), _) => println!("{} {}", convert_weight(value, unit), unit),
        (None, Some(unit)) => println!("{} {}", convert_to_kg(value, unit), WeightUnit::Kg),
        (None, None) => return Err(Error::Other("pass --to or --from".into())),
    }
    Ok(())
}

fn cmd_classify(
    current: &[i32],
    previous: &[i32],
    target: i32,
    sessions: i32,
    json: bool,
) -> Result<()> {
    let status = determine_status(current, previous, target, sessions);

    if json {
        println!("{}", serde_json::to_string(&status)?);
    } else {
        print_status(status);
    }
    Ok(())
}

fn print_status(status: OverloadStatus) {
    println!("  status: {}", status);
    if status.ready_to_increase() {
        println!("  → ready to increase weight");
    }
}

fn cmd_log_set(
    store: &LogStore,
    exercise: &str,
    weight: f64,
    reps: i32,
    unit: Option<WeightUnit>,
    date: NaiveDate,
) -> Result<()> {
    let unit = match unit {
        Some(unit) => unit,
        None => store.settings()?.weight_unit,
    };
    let weight_kg = convert_to_kg(weight, unit);

    let entry = store.log_set(exercise, date, weight_kg, reps)?;

    println!(
        "✓ Logged {}: {} x {} on {}",
        entry.exercise_id,
        format_in_unit(weight, unit),
        entry.reps,
        format_date_key(entry.performed_on)
    );
    Ok(())
}

fn join_reps(reps: &[i32]) -> String {
    if reps.is_empty() {
        return "-".into();
    }
    reps.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_status(
    store: &LogStore,
    config: &Config,
    exercise: &str,
    target: Option<i32>,
    json: bool,
) -> Result<()> {
    let target = target
        .or_else(|| default_catalog().target_rep_max(exercise))
        .unwrap_or(config.progression.default_target_rep_max);
    let unit = store.settings()?.weight_unit;
    let sets = store.sets_for(exercise)?;

    let inputs = overload_inputs(&sets, exercise);
    let status = match &inputs {
        Some(i) => determine_status(
            &i.current_reps,
            &i.previous_reps,
            target,
            i.sessions_at_weight,
        ),
        None => determine_status(&[], &[], target, 0),
    };

    if json {
        let mut value = serde_json::to_value(status)?;
        value["exercise"] = exercise.into();
        value["target_rep_max"] = target.into();
        value["unit"] = unit.as_str().into();
        if let Some(i) = &inputs {
            value["working_weight"] = convert_weight(i.working_weight_kg, unit).into();
            value["current_reps"] = i.current_reps.clone().into();
            value["previous_reps"] = i.previous_reps.clone().into();
            value["sessions_at_weight"] = i.sessions_at_weight.into();
        }
        println!("{}", value);
        return Ok(());
    }

    match &inputs {
        Some(i) => {
            println!("{} @ {}", exercise, format_weight(i.working_weight_kg, unit));
            println!("  current:  {}", join_reps(&i.current_reps));
            println!("  previous: {}", join_reps(&i.previous_reps));
            println!("  sessions at weight: {}", i.sessions_at_weight);
            println!("  rep ceiling: {}", target);
        }
        None => println!("No sets logged for {}", exercise),
    }
    print_status(status);
    Ok(())
}

fn cmd_summary(store: &LogStore, config: &Config, exercise: &str, today: NaiveDate) -> Result<()> {
    let unit = store.settings()?.weight_unit;
    let days = config.progression.history_days;
    let sets = recent_sets(&store.sets_for(exercise)?, today, days);

    let Some(summary) = exercise_summary(&sets, exercise) else {
        println!("No sets logged for {} in the last {} days", exercise, days);
        return Ok(());
    };

    println!("{} (last {} days)", exercise, days);
    println!("  sessions: {}", summary.sessions);
    println!("  sets: {}", summary.total_sets);
    println!("  heaviest: {}", format_weight(summary.heaviest_kg, unit));
    println!(
        "  best set volume: {}",
        format_weight(summary.best_set_volume_kg, unit)
    );
    println!(
        "  total volume: {}",
        format_weight(summary.total_volume_kg, unit)
    );
    println!(
        "  last performed: {}",
        format_date_key(summary.last_performed)
    );
    Ok(())
}

fn cmd_log_meal(store: &LogStore, meal: NewMeal, today: NaiveDate) -> Result<()> {
    let entry = store.log_meal(meal, today)?;
    println!(
        "✓ Logged {} '{}' ({} kcal) on {} {}",
        entry.kind,
        entry.name,
        entry.calories,
        day_label(entry.date),
        format_date_key(entry.date)
    );
    Ok(())
}

fn cmd_week(store: &LogStore, offset: i64, today: NaiveDate) -> Result<()> {
    let meals = store.meals()?;
    let week = weekly_nutrition(&meals, offset, today)?;

    if let Some((monday, _)) = week.first() {
        println!("Week of {}", format_date_key(*monday));
    }

    for (date, totals) in &week {
        let marker = if is_today(*date, today) {
            "today"
        } else if meal_log_block(*date, today).is_some() {
            "closed"
        } else {
            "open"
        };
        println!(
            "  {} {}  {:<6} {} meals  {} kcal",
            day_label(*date),
            format_date_key(*date),
            marker,
            totals.meals,
            totals.calories
        );
    }
    Ok(())
}

fn cmd_unit(store: &LogStore, unit: Option<WeightUnit>) -> Result<()> {
    match unit {
        Some(unit) => {
            store.set_preferred_unit(unit)?;
            println!("✓ Preferred unit set to {}", unit);
        }
        None => println!("{}", store.settings()?.weight_unit),
    }
    Ok(())
}

fn cmd_exercises() -> Result<()> {
    let catalog = default_catalog();
    for id in catalog.ids() {
        if let Some(exercise) = catalog.get(id) {
            println!(
                "  {:<16} {:<16} {}-{} reps",
                exercise.id, exercise.name, exercise.target_rep_min, exercise.target_rep_max
            );
        }
    }
    Ok(())
}

fn cmd_export(store: &LogStore, out: PathBuf, unit: Option<WeightUnit>) -> Result<()> {
    let unit = match unit {
        Some(unit) => unit,
        None => store.settings()?.weight_unit,
    };

    let sets_path = out.join("sets.csv");
    let meals_path = out.join("meals.csv");
    let set_count = export_sets(&store.sets()?, &sets_path, unit)?;
    let meal_count = export_meals(&store.meals()?, &meals_path)?;

    println!("✓ Exported {} sets to {}", set_count, sets_path.display());
    println!("✓ Exported {} meals to {}", meal_count, meals_path.display());
    Ok(())
}
