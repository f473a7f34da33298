//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_feed_adapter::CsvFeedAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::CarteiraError;
use crate::domain::pipeline::{generate_portfolio, load_price_history, ScreenRequest};
use crate::domain::portfolio::Portfolio;
use crate::domain::series::AggregatedPoint;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "carteira", about = "Magic Formula stock screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a portfolio from the universe snapshot
    Screen {
        #[arg(short, long)]
        config: PathBuf,
        /// Profitability indicator (roe, roc, roic)
        #[arg(long)]
        profitability: Option<String>,
        /// Discount indicator (earning_yield, dividend_yield, p_vp)
        #[arg(long)]
        discount: Option<String>,
        /// Universe snapshot date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        /// Number of securities to select
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Build the aligned portfolio-vs-benchmark close series
    Chart {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated ticker list (defaults to [chart] tickers)
        #[arg(long)]
        tickers: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Benchmark ticker override
        #[arg(long)]
        benchmark: Option<String>,
        /// Write the series CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen {
            config,
            profitability,
            discount,
            as_of,
            count,
        } => run_screen(
            &config,
            profitability.as_deref(),
            discount.as_deref(),
            as_of.as_deref(),
            count,
        ),
        Command::Chart {
            config,
            tickers,
            start,
            end,
            benchmark,
            output,
        } => run_chart(
            &config,
            tickers.as_deref(),
            start.as_deref(),
            end.as_deref(),
            benchmark.as_deref(),
            output.as_ref(),
        ),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CarteiraError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Comma-separated ticker list errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TickerListError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Parse a comma-separated ticker list: trimmed, uppercased, no empty
/// tokens, no duplicates.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, TickerListError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(TickerListError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if seen.contains(&ticker) {
            return Err(TickerListError::DuplicateTicker(ticker));
        }
        seen.insert(ticker.clone());
        tickers.push(ticker);
    }

    Ok(tickers)
}

fn parse_config_date(
    value: &str,
    section: &str,
    key: &str,
) -> Result<NaiveDate, CarteiraError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CarteiraError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

pub fn build_screen_request(
    adapter: &dyn ConfigPort,
    profitability: Option<&str>,
    discount: Option<&str>,
    as_of: Option<&str>,
    count: Option<usize>,
) -> Result<ScreenRequest, CarteiraError> {
    let as_of_str = match as_of {
        Some(s) => s.to_string(),
        None => {
            adapter
                .get_string("screen", "as_of")
                .ok_or_else(|| CarteiraError::ConfigMissing {
                    section: "screen".into(),
                    key: "as_of".into(),
                })?
        }
    };
    let as_of = parse_config_date(&as_of_str, "screen", "as_of")?;

    let count = match count {
        Some(n) => n,
        None => {
            let n = adapter.get_int("screen", "count", 30);
            usize::try_from(n).map_err(|_| CarteiraError::ConfigInvalid {
                section: "screen".into(),
                key: "count".into(),
                reason: format!("negative portfolio size: {n}"),
            })?
        }
    };

    Ok(ScreenRequest {
        profitability: profitability
            .map(str::to_string)
            .or_else(|| adapter.get_string("screen", "profitability"))
            .unwrap_or_else(|| "roe".to_string()),
        discount: discount
            .map(str::to_string)
            .or_else(|| adapter.get_string("screen", "discount"))
            .unwrap_or_else(|| "earning_yield".to_string()),
        as_of,
        count,
        tie_break: adapter
            .get_string("screen", "tie_break")
            .unwrap_or_else(|| "volume".to_string()),
    })
}

pub fn build_feed(adapter: &dyn ConfigPort) -> Result<CsvFeedAdapter, CarteiraError> {
    let data_dir =
        adapter
            .get_string("feed", "data_dir")
            .ok_or_else(|| CarteiraError::ConfigMissing {
                section: "feed".into(),
                key: "data_dir".into(),
            })?;
    Ok(CsvFeedAdapter::new(
        PathBuf::from(data_dir),
        adapter.get_string("feed", "benchmark"),
    ))
}

fn run_screen(
    config_path: &PathBuf,
    profitability: Option<&str>,
    discount: Option<&str>,
    as_of: Option<&str>,
    count: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let request = match build_screen_request(&adapter, profitability, discount, as_of, count) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let feed = match build_feed(&adapter) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Screening universe as of {} ({} + {}, top {})",
        request.as_of, request.profitability, request.discount, request.count
    );

    let portfolio = match generate_portfolio(&feed, &request) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_portfolio(&portfolio);
    eprintln!("\n{} securities selected", portfolio.len());
    ExitCode::SUCCESS
}

fn print_portfolio(portfolio: &Portfolio) {
    println!(
        "{:>3}  {:<8} {:<16} {:>7} {:>7} {:>7} {:>9} {:>9} {:>7} {:>8}",
        "#", "ticker", "sector", "roe", "roc", "roic", "earn_yld", "div_yld", "p_vp", "score"
    );
    for p in &portfolio.positions {
        let f = &p.fundamentals;
        println!(
            "{:>3}  {:<8} {:<16} {:>7.3} {:>7.3} {:>7.3} {:>9.3} {:>9.3} {:>7.3} {:>8.1}",
            p.position,
            p.ticker,
            p.sector,
            f.roe,
            f.roc,
            f.roic,
            f.earning_yield,
            f.dividend_yield,
            f.p_vp,
            p.score
        );
    }
}

fn resolve_tickers(
    override_list: Option<&str>,
    adapter: &dyn ConfigPort,
) -> Result<Vec<String>, ExitCode> {
    let input = match override_list {
        Some(s) => s.to_string(),
        None => match adapter.get_string("chart", "tickers") {
            Some(s) => s,
            None => {
                eprintln!("error: no tickers given (use --tickers or set [chart] tickers)");
                return Err(ExitCode::from(2));
            }
        },
    };

    parse_tickers(&input).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(4)
    })
}

fn resolve_chart_date(
    override_value: Option<&str>,
    adapter: &dyn ConfigPort,
    key: &str,
) -> Result<NaiveDate, CarteiraError> {
    let value = match override_value {
        Some(s) => s.to_string(),
        None => adapter.get_string("chart", key).ok_or_else(|| {
            CarteiraError::ConfigMissing {
                section: "chart".into(),
                key: key.into(),
            }
        })?,
    };
    parse_config_date(&value, "chart", key)
}

fn run_chart(
    config_path: &PathBuf,
    tickers: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    benchmark: Option<&str>,
    output: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let tickers = match resolve_tickers(tickers, &adapter) {
        Ok(t) => t,
        Err(code) => return code,
    };

    let start_date = match resolve_chart_date(start, &adapter, "start_date") {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let end_date = match resolve_chart_date(end, &adapter, "end_date") {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if end_date < start_date {
        eprintln!("error: end date {end_date} is before start date {start_date}");
        return ExitCode::from(4);
    }

    let feed = match build_feed(&adapter) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Loading prices for {} tickers, {} to {}",
        tickers.len(),
        start_date,
        end_date
    );

    let series = load_price_history(&feed, &tickers, start_date, end_date, benchmark);

    if series.is_empty() {
        eprintln!("No price data in range; nothing to chart");
        return ExitCode::from(5);
    }

    let csv = render_series_csv(&series);
    match output {
        Some(path) => match fs::write(path, &csv) {
            Ok(()) => {
                eprintln!("Series written to: {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to write {}: {}", path.display(), e);
                ExitCode::from(1)
            }
        },
        None => {
            print!("{csv}");
            ExitCode::SUCCESS
        }
    }
}

/// `date,portfolio,benchmark` rows; unset leading values are empty cells.
pub fn render_series_csv(series: &[AggregatedPoint]) -> String {
    let mut out = String::from("date,portfolio,benchmark\n");
    for point in series {
        let portfolio = point
            .portfolio_close
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        let benchmark = point
            .benchmark_close
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        out.push_str(&format!("{},{},{}\n", point.date, portfolio, benchmark));
    }
    out
}
