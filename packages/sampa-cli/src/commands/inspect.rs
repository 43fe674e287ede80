use crate::cli::InspectArgs;
use crate::exit_codes;
use crate::filter_params;
use crate::output;
use sampa_rs::slope_filter::{self, deltas};
use sampa_rs::{parse_sample_list, FilterParameters, FilterResult, Transition};
use serde::Serialize;

#[derive(Serialize)]
struct TransitionRow {
    index: usize,
    from: f64,
    to: f64,
    delta: f64,
    class: Transition,
    flagged: bool,
}

#[derive(Serialize)]
struct InspectOutput {
    parameters: FilterParameters,
    result: FilterResult,
    transitions: Vec<TransitionRow>,
}

pub fn execute(args: InspectArgs) -> i32 {
    let samples = match parse_sample_list(&args.samples) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    let params = match filter_params::resolve_parameters(&args.params) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let npoints = args.npoints.unwrap_or(samples.len());
    let inspected = match inspect(&samples, npoints, &params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    if args.json {
        if let Err(e) = output::emit(&inspected, false, None) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else {
        println!(
            "BC3: slope_down={}, slope_up={}, round={}\n",
            params.slope_down, params.slope_up, params.round
        );
        println!(
            "  {:<6} {:>12} {:>12} {:>12}  {:<14}",
            "Index", "From", "To", "Delta", "Class"
        );
        println!("  {}", "-".repeat(62));
        for row in &inspected.transitions {
            println!(
                "  {:<6} {:>12.4} {:>12.4} {:>12.4}  {:<14}{}",
                row.index,
                row.from,
                row.to,
                row.delta,
                row.class.label(),
                if row.flagged { " *" } else { "" }
            );
        }
        println!();
        match inspected.result.first_flagged {
            None => println!("Verdict: accepted"),
            Some(idx) => println!(
                "Verdict: rejected (first flagged transition: {}, {} flagged)",
                idx, inspected.result.flagged_transitions
            ),
        }
    }

    exit_codes::SUCCESS
}

fn inspect(
    samples: &[f64],
    npoints: usize,
    params: &FilterParameters,
) -> sampa_rs::Result<InspectOutput> {
    let result = slope_filter::evaluate(samples, npoints, params)?;
    let window = &samples[..npoints];

    let transitions = deltas(window)
        .enumerate()
        .map(|(index, delta)| {
            let class = slope_filter::classify(delta, params);
            TransitionRow {
                index,
                from: window[index],
                to: window[index + 1],
                delta,
                class,
                flagged: class.is_flagged(),
            }
        })
        .collect();

    Ok(InspectOutput {
        parameters: *params,
        result,
        transitions,
    })
}
