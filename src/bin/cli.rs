use staffing_forecast::calendar::{DateWindow, TargetWindows};
use staffing_forecast::{
    DailyPlan, ForecastVolumes, PlanClock, RateTable, ShiftConfig, export_roles_to_csv,
    load_plans_from_json, parse_plan_date, save_plans_to_json,
};
use std::io::{self, Write};

fn render_plan_as_text_table(plan: &DailyPlan) -> String {
    let header = ["area", "role", "count"];
    let rows: Vec<[String; 3]> = plan
        .required_roles
        .entries()
        .iter()
        .map(|(area, role, count)| [area.to_string(), role.to_string(), count.to_string()])
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = format!("{} ({})\n", plan.date, plan.day_name);
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!("Total staff: {}", plan.total_staff));
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  today <YYYY-MM-DD>                     Plan as if today were the given date\n  dates [YYYY-MM-DD]                     Show the two target planning days\n  calc <tomorrow|day_after> <incoming> <shipping> <cases> <staged>\n                                         Compute required roles for a target day\n  plans                                  Show computed plans\n  rates                                  Show throughput rate table\n  rate <area> <name> <minutes>           Set a throughput rate\n  shift <hours> <efficiency>             Set shift length and workforce efficiency\n  save json <path>                       Save computed plans to JSON\n  load json <path>                       Load plans from JSON\n  export csv <path>                      Export role counts to CSV\n  quit|exit                              Exit"
    );
}

fn print_windows(windows: &TargetWindows) {
    for (label, window) in [("Tomorrow", &windows.tomorrow), ("Day after", &windows.day_after)] {
        println!(
            "{label:<10}: {} ({}) {} -> {}",
            window.date(),
            window.day_name(),
            window.start,
            window.end
        );
    }
}

fn print_rates(rates: &RateTable) {
    for area in rates.areas() {
        if let Some(values) = rates.area(area) {
            for (name, minutes) in values {
                println!("  {:<8} {:<26} {}", area, name, minutes);
            }
        }
    }
}

fn parse_volumes(args: &[&str]) -> Option<ForecastVolumes> {
    if args.len() != 4 {
        return None;
    }
    let mut values = [0.0; 4];
    for (slot, raw) in values.iter_mut().zip(args) {
        *slot = raw.parse::<f64>().ok()?;
    }
    Some(ForecastVolumes::new(values[0], values[1], values[2], values[3]))
}

fn upsert_plan(plans: &mut Vec<DailyPlan>, plan: DailyPlan) {
    plans.retain(|existing| existing.date != plan.date);
    plans.push(plan);
    plans.sort_by_key(|p| p.date);
}

fn main() {
    env_logger::init();

    let mut clock = PlanClock::System;
    let mut shift = ShiftConfig::default();
    let mut rates = RateTable::default();
    let mut plans: Vec<DailyPlan> = Vec::new();

    println!("Staffing Forecast (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0];
        let args = &parts[1..];

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "today" => match args.first().map(|raw| parse_plan_date(raw)) {
                Some(Ok(date)) => {
                    clock = PlanClock::Fixed(date);
                    println!("Planning from {date}.");
                }
                Some(Err(e)) => println!("Error: {e}"),
                None => println!("Usage: today <YYYY-MM-DD>"),
            },
            "dates" => match args.first() {
                Some(raw) => match parse_plan_date(raw) {
                    Ok(date) => print_windows(&PlanClock::Fixed(date).target_windows()),
                    Err(e) => println!("Error: {e}"),
                },
                None => print_windows(&clock.target_windows()),
            },
            "calc" => {
                let windows = clock.target_windows();
                let window: Option<DateWindow> = match args.first().copied() {
                    Some("tomorrow") => Some(windows.tomorrow),
                    Some("day_after") => Some(windows.day_after),
                    _ => None,
                };
                match (window, parse_volumes(args.get(1..).unwrap_or_default())) {
                    (Some(window), Some(volumes)) => {
                        let plan = DailyPlan::build(window, volumes, &shift, &rates);
                        println!("{}", render_plan_as_text_table(&plan));
                        upsert_plan(&mut plans, plan);
                    }
                    _ => println!(
                        "Usage: calc <tomorrow|day_after> <incoming> <shipping> <cases> <staged>"
                    ),
                }
            }
            "plans" => {
                if plans.is_empty() {
                    println!("No plans computed.");
                }
                for plan in &plans {
                    println!("{}", render_plan_as_text_table(plan));
                }
            }
            "rates" => print_rates(&rates),
            "rate" => match args {
                [area, name, minutes] => match minutes.parse::<f64>() {
                    Ok(minutes) => match rates.set_rate(area, name, minutes) {
                        Ok(()) => println!("Rate {area}.{name} set to {minutes}."),
                        Err(e) => println!("Error: {e}"),
                    },
                    Err(_) => println!("Invalid minutes"),
                },
                _ => println!("Usage: rate <area> <name> <minutes>"),
            },
            "shift" => match args {
                [hours, efficiency] => match (hours.parse::<f64>(), efficiency.parse::<f64>()) {
                    (Ok(hours), Ok(efficiency)) => {
                        shift = ShiftConfig::new(hours, efficiency);
                        println!(
                            "Shift set: {hours}h at {efficiency} efficiency ({} effective minutes).",
                            shift.effective_minutes_per_person()
                        );
                    }
                    _ => println!("Invalid shift values"),
                },
                _ => println!("Usage: shift <hours> <efficiency>"),
            },
            "save" | "load" | "export" => match (cmd, args) {
                ("save", ["json", path]) => match save_plans_to_json(&plans, path) {
                    Ok(()) => println!("Plans saved to {path}."),
                    Err(e) => println!("Save error: {e}"),
                },
                ("load", ["json", path]) => match load_plans_from_json(path) {
                    Ok(loaded) => {
                        plans = loaded;
                        println!("Plans loaded from {path} ({} days).", plans.len());
                    }
                    Err(e) => println!("Load error: {e}"),
                },
                ("export", ["csv", path]) => match export_roles_to_csv(&plans, path) {
                    Ok(()) => println!("Roles exported to {path}."),
                    Err(e) => println!("Export error: {e}"),
                },
                _ => println!("Usage: save json <path> | load json <path> | export csv <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
