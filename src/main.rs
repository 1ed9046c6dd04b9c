use anyhow::Result;
use dovmap::cli::{self, Cli, Commands, ParallelArgs, ReportArgs};
use dovmap::commands::{
    self, AnnotateConfig, AppendConfig, ClassifyConfig, CompareConfig, CompareStepsConfig,
    StepsConfig,
};
use dovmap::config::{self, DovmapConfig, ParallelConfig};
use dovmap::io::output::OutputFormat;
use dovmap::progress::ProgressConfig;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);

    let config = config::load_config();
    run(cli, &config)
}

fn run(cli: Cli, config: &DovmapConfig) -> Result<()> {
    let progress = ProgressConfig::from_env(cli.verbosity);

    match cli.command {
        Commands::Classify {
            input,
            report,
            parallel,
        } => {
            let format = resolve_output(&report, config);
            commands::classify_dataset(ClassifyConfig {
                input,
                format,
                output: report.output,
                parallel: resolve_parallel(parallel, config),
                progress,
            })
        }
        Commands::Annotate {
            input,
            output,
            parallel,
        } => commands::annotate_dataset(AnnotateConfig {
            input,
            output,
            parallel: resolve_parallel(parallel, config),
            progress,
        }),
        Commands::Compare {
            before,
            after,
            report,
            parallel,
        } => {
            let format = resolve_output(&report, config);
            commands::compare_datasets(CompareConfig {
                before,
                after,
                format,
                output: report.output,
                parallel: resolve_parallel(parallel, config),
                progress,
            })
        }
        Commands::Steps {
            input,
            measure,
            report,
        } => {
            let format = resolve_output(&report, config);
            commands::summarize_steps(StepsConfig {
                input,
                measure: measure.unwrap_or(config.steps().measure),
                format,
                output: report.output,
            })
        }
        Commands::CompareSteps {
            before,
            after,
            input_type,
            threshold,
            measure,
            report,
        } => {
            let format = resolve_output(&report, config);
            let defaults = config.steps();
            commands::compare_steps(CompareStepsConfig {
                before,
                after,
                kind: input_type,
                threshold: threshold.unwrap_or(defaults.threshold),
                measure: measure.unwrap_or(defaults.measure),
                format,
                output: report.output,
            })
        }
        Commands::Append {
            inputs,
            output_dir,
            measure,
        } => commands::append_measures(AppendConfig {
            inputs,
            output_dir,
            measure: measure.unwrap_or(config.steps().measure),
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

// Format precedence: --format, then output.default_format, then terminal.
fn resolve_output(report: &ReportArgs, config: &DovmapConfig) -> OutputFormat {
    let output = config.output();
    cli::configure_colors(report.plain, output.use_color);
    report
        .format
        .or(output.default_format)
        .unwrap_or(OutputFormat::Terminal)
}

fn resolve_parallel(args: ParallelArgs, config: &DovmapConfig) -> ParallelConfig {
    let parallel = config
        .parallel()
        .with_overrides(args.jobs, args.no_parallel);
    cli::configure_thread_pool(&parallel);
    parallel
}
