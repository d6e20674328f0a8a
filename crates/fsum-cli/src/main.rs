use fsum_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is unwritable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match cli::run_from_args() {
        Ok(all_ok) => {
            if !all_ok {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("fsum error: {:#}", err);
            std::process::exit(2);
        }
    }
}
