use crate::cli::FilterArgs;
use crate::exit_codes;
use crate::filter_params;
use crate::output;
use sampa_rs::{read_sample_file, SampaError};

pub fn execute(args: FilterArgs) -> i32 {
    if let Err(msg) = filter_params::validate_file(&args.file) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
    }

    let pipeline = match filter_params::build_pipeline(&args.options) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let table = match read_sample_file(&args.file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    if !args.quiet {
        let params = pipeline.filter().params();
        eprintln!("Filtering {}...", args.file);
        eprintln!(
            "  Channels: {} x {} time bins",
            table.num_channels(),
            table.num_timebins()
        );
        eprintln!(
            "  BC3: slope_down={}, slope_up={}, round={}",
            params.slope_down, params.slope_up, params.round
        );
    }

    let report = match pipeline.process(&table, &args.file, args.options.channels.as_deref()) {
        Ok(r) => r,
        Err(e @ SampaError::InvalidArgument(_)) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
        Err(e) => {
            eprintln!("Filtering failed: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    if let Err(e) = output::emit(&report, args.compact, args.output.as_deref()) {
        eprintln!("Error: {}", e);
        return exit_codes::EXECUTION_ERROR;
    }

    if !args.quiet {
        eprintln!(
            "{} accepted, {} rejected",
            report.accepted, report.rejected
        );
        if let Some(ref path) = args.output {
            eprintln!("Results written to {}", path);
        }
    }

    if args.fail_on_reject && !report.all_accepted() {
        exit_codes::REJECTED
    } else {
        exit_codes::SUCCESS
    }
}
