use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use momentix::config::{Config, ReturnFormula};
use momentix::logging;
use momentix::models::portfolio::SimulationResult;
use momentix::models::screening::{RankedStock, ScreeningResult};
use momentix::services::{IndexRegistry, StaticIndexRegistry, YahooMarketDataProvider};
use momentix::{PortfolioSimulator, ScreeningPipeline};

#[derive(Parser, Debug)]
#[command(
    name = "momentum-screener",
    version,
    about = "Momentum stock screener and equal-weight portfolio simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in indices
    Indices,

    /// Screen every constituent of an index
    Screen {
        /// Index key, e.g. nifty_50 or magnificent_7
        index: String,

        /// Number of top-ranked stocks to print
        #[arg(long = "top-n")]
        top_n: Option<usize>,

        /// Use the legacy 12-month return `now / (then - 1) * 100`.
        ///
        /// This is not a percentage return and is only kept for comparison
        /// with historical screens.
        #[arg(long, default_value_t = false)]
        legacy: bool,
    },

    /// Backtest an equal-weight buy-and-hold portfolio
    Simulate {
        /// Ticker symbols as the market-data provider spells them
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Total amount to invest
        #[arg(long)]
        amount: f64,

        /// Holding period in months (1-6)
        #[arg(long, default_value_t = 3)]
        months: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init_logging(&config.environment)?;

    let registry = StaticIndexRegistry::new();
    let provider = YahooMarketDataProvider::new(&config.market_data);

    match cli.command {
        Commands::Indices => {
            println!("{:<20} {:>6}  {}", "KEY", "STOCKS", "NAME");
            for index in registry.list_indices() {
                println!("{:<20} {:>6}  {}", index.key, index.stock_count, index.name);
            }
        }
        Commands::Screen {
            index,
            top_n,
            legacy,
        } => {
            let tickers = registry.list_tickers(&index)?;
            let formula = if legacy {
                ReturnFormula::Legacy
            } else {
                config.screener.return_formula
            };
            let top_n = top_n.unwrap_or(config.screener.top_n);
            let pipeline =
                ScreeningPipeline::new(config.screener.clone().with_return_formula(formula));
            let result = pipeline.run(&provider, &tickers, top_n).await?;
            print_screen(&index, &result);
        }
        Commands::Simulate {
            tickers,
            amount,
            months,
        } => {
            let simulator =
                PortfolioSimulator::new().with_concurrency(config.screener.concurrency);
            let result = simulator.simulate(&provider, &tickers, amount, months).await?;
            print_simulation(&result);
        }
    }

    Ok(())
}

fn cell(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "-".to_string())
}

fn rank_cell(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_screen(index: &str, result: &ScreeningResult) {
    let summary = &result.summary;
    println!(
        "{}: {} analysed, {} passed, {} rejected, {} excluded ({:.1}% pass rate, {} 12M return)",
        index,
        summary.total_analyzed,
        summary.passed_filters,
        summary.rejected,
        summary.excluded,
        summary.pass_rate,
        result.return_formula
    );
    println!(
        "gate failures: trend {}, proximity {}, consistency {}, performance {}",
        summary.gate_failures.trend,
        summary.gate_failures.proximity,
        summary.gate_failures.consistency,
        summary.gate_failures.performance
    );
    println!();

    if result.top_stocks.is_empty() {
        println!("No stocks passed all four gates.");
    } else {
        println!(
            "{:>4} {:<16} {:>10} {:>9} {:>9} {:>8} {:>8} {:>8}",
            "RANK", "TICKER", "PRICE", "RET 6M", "RET 12M", "UP DAYS", "RANK 6M", "RANK 12M"
        );
        for stock in &result.top_stocks {
            print_ranked(stock);
        }
    }

    for excluded in &result.excluded {
        println!("excluded {}: {}", excluded.ticker, excluded.reason);
    }
}

fn print_ranked(stock: &RankedStock) {
    let ind = &stock.indicators;
    println!(
        "{:>4} {:<16} {:>10} {:>9} {:>9} {:>8} {:>8} {:>8}",
        rank_cell(stock.final_rank),
        stock.ticker,
        cell(ind.current_price, 2),
        cell(ind.return_6m, 2),
        cell(ind.selected_return_12m(), 2),
        cell(ind.up_days_pct_6m, 1),
        rank_cell(stock.rank_6m),
        rank_cell(stock.rank_12m)
    );
}

fn print_simulation(result: &SimulationResult) {
    println!(
        "{:<16} {:>12} {:>10} {:>12} {:>10} {:>12} {:>9}",
        "TICKER", "BUY DATE", "BUY", "SHARES", "CURRENT", "VALUE", "RETURN %"
    );
    for stock in &result.stocks {
        if let Some(error) = &stock.error {
            println!("{:<16} error: {}", stock.ticker, error);
            continue;
        }
        println!(
            "{:<16} {:>12} {:>10} {:>12} {:>10} {:>12} {:>9}",
            stock.ticker,
            stock
                .buy_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            cell(stock.buy_price, 2),
            cell(stock.shares_bought, 4),
            cell(stock.current_price, 2),
            cell(stock.current_value, 2),
            cell(stock.return_pct, 2)
        );
    }
    println!();
    println!(
        "invested {:.2} over {} months ({:.2} per stock)",
        result.total_invested, result.period_months, result.per_stock_amount
    );
    println!(
        "current value {:.2}, profit/loss {:.2} ({:.2}%)",
        result.current_value, result.total_profit_loss, result.total_return_pct
    );
}
