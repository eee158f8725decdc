use std::io;
use std::process::ExitCode;

use rail_router::graph::StationGraph;
use rail_router::planner::{PlannerConfig, plan_all_pairs};
use rail_router::report::{JsonReporter, TextReporter};
use rail_router::schedule::{ScheduleSource, XmlSchedule};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            path = Some(arg);
        }
    }
    let Some(path) = path else {
        eprintln!("usage: rail-router [--json] <schedule.xml>");
        return ExitCode::from(2);
    };

    let legs = match XmlSchedule::new(&path).load() {
        Ok(legs) => legs,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(legs = legs.len(), path, "loaded schedule");

    let mut graph = StationGraph::new();
    for leg in legs {
        if let Err(error) = graph.add_service(leg) {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    }

    let config = PlannerConfig::default();
    let stdout = io::stdout().lock();

    let result = if json {
        let mut reporter = JsonReporter::new(stdout);
        plan_all_pairs(&graph, &config, &mut reporter).and_then(|()| reporter.finish())
    } else {
        let mut reporter = TextReporter::new(stdout);
        plan_all_pairs(&graph, &config, &mut reporter)
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
