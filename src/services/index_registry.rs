//! Index constituent lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::EngineError;

/// Listing venue, which decides the ticker suffix the data provider expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Nse,
    Us,
}

impl Market {
    fn ticker_suffix(&self) -> &'static str {
        match self {
            Market::Nse => ".NS",
            Market::Us => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub key: String,
    pub name: String,
    pub description: String,
    pub market: Market,
    pub stock_count: usize,
}

pub trait IndexRegistry: Send + Sync {
    fn list_indices(&self) -> Vec<IndexInfo>;

    /// Provider-ready ticker symbols for `key`, in registry order.
    fn list_tickers(&self, key: &str) -> Result<Vec<String>, EngineError>;
}

enum Members {
    List(&'static [&'static str]),
    /// De-duplicated, sorted union of several lists.
    Union(&'static [&'static [&'static str]]),
}

struct IndexDefinition {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    market: Market,
    members: Members,
}

impl IndexDefinition {
    fn tickers(&self) -> Vec<String> {
        let suffix = self.market.ticker_suffix();
        let symbols: Vec<&str> = match &self.members {
            Members::List(list) => list.to_vec(),
            Members::Union(lists) => lists
                .iter()
                .flat_map(|list| list.iter().copied())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };
        symbols
            .into_iter()
            .map(|symbol| format!("{}{}", symbol, suffix))
            .collect()
    }

    fn info(&self) -> IndexInfo {
        IndexInfo {
            key: self.key.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            market: self.market,
            stock_count: self.tickers().len(),
        }
    }
}

/// Built-in constituent table for NSE and US indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticIndexRegistry;

impl StaticIndexRegistry {
    pub fn new() -> Self {
        Self
    }

    fn find(key: &str) -> Option<&'static IndexDefinition> {
        let key = key.trim().to_lowercase();
        INDICES.iter().find(|def| def.key == key)
    }
}

impl IndexRegistry for StaticIndexRegistry {
    fn list_indices(&self) -> Vec<IndexInfo> {
        INDICES.iter().map(IndexDefinition::info).collect()
    }

    fn list_tickers(&self, key: &str) -> Result<Vec<String>, EngineError> {
        let def = Self::find(key).ok_or_else(|| EngineError::UnknownIndex(key.trim().to_string()))?;
        let tickers = def.tickers();
        debug!(index = def.key, tickers = tickers.len(), "loaded index constituents");
        Ok(tickers)
    }
}

const INDICES: &[IndexDefinition] = &[
    IndexDefinition {
        key: "nifty_50",
        name: "Nifty 50",
        description: "Top 50 companies by market cap",
        market: Market::Nse,
        members: Members::List(NIFTY_50),
    },
    IndexDefinition {
        key: "nifty_next_50",
        name: "Nifty Next 50",
        description: "Next 50 companies after Nifty 50",
        market: Market::Nse,
        members: Members::List(NIFTY_NEXT_50),
    },
    IndexDefinition {
        key: "nifty_100",
        name: "Nifty 100",
        description: "Top 100 companies",
        market: Market::Nse,
        members: Members::Union(&[NIFTY_50, NIFTY_NEXT_50]),
    },
    IndexDefinition {
        key: "nifty_it",
        name: "Nifty IT",
        description: "Information Technology sector",
        market: Market::Nse,
        members: Members::List(NIFTY_IT),
    },
    IndexDefinition {
        key: "nifty_bank",
        name: "Nifty Bank",
        description: "Banking sector",
        market: Market::Nse,
        members: Members::List(NIFTY_BANK),
    },
    IndexDefinition {
        key: "nifty_pharma",
        name: "Nifty Pharma",
        description: "Pharmaceutical sector",
        market: Market::Nse,
        members: Members::List(NIFTY_PHARMA),
    },
    IndexDefinition {
        key: "nifty_auto",
        name: "Nifty Auto",
        description: "Automobile sector",
        market: Market::Nse,
        members: Members::List(NIFTY_AUTO),
    },
    IndexDefinition {
        key: "nifty_fmcg",
        name: "Nifty FMCG",
        description: "Fast Moving Consumer Goods",
        market: Market::Nse,
        members: Members::List(NIFTY_FMCG),
    },
    IndexDefinition {
        key: "nifty_metal",
        name: "Nifty Metal",
        description: "Metal & Mining sector",
        market: Market::Nse,
        members: Members::List(NIFTY_METAL),
    },
    IndexDefinition {
        key: "nifty_psu_bank",
        name: "Nifty PSU Bank",
        description: "Public Sector Banks",
        market: Market::Nse,
        members: Members::List(NIFTY_PSU_BANK),
    },
    IndexDefinition {
        key: "nifty_realty",
        name: "Nifty Realty",
        description: "Real Estate sector",
        market: Market::Nse,
        members: Members::List(NIFTY_REALTY),
    },
    IndexDefinition {
        key: "nifty_energy",
        name: "Nifty Energy",
        description: "Energy sector",
        market: Market::Nse,
        members: Members::List(NIFTY_ENERGY),
    },
    IndexDefinition {
        key: "nifty_infra",
        name: "Nifty Infra",
        description: "Infrastructure sector",
        market: Market::Nse,
        members: Members::List(NIFTY_INFRA),
    },
    IndexDefinition {
        key: "nifty_midcap_50",
        name: "Nifty Midcap 50",
        description: "Top 50 midcap companies",
        market: Market::Nse,
        members: Members::List(NIFTY_MIDCAP_50),
    },
    IndexDefinition {
        key: "nifty_midcap_100",
        name: "Nifty Midcap 100",
        description: "Top 100 midcap companies",
        market: Market::Nse,
        members: Members::Union(&[NIFTY_MIDCAP_50, NIFTY_MIDCAP_100_EXTRA]),
    },
    IndexDefinition {
        key: "sp500_top50",
        name: "S&P 500 Top 50",
        description: "Largest 50 S&P 500 members by market cap",
        market: Market::Us,
        members: Members::List(SP500_TOP50),
    },
    IndexDefinition {
        key: "nasdaq_100",
        name: "Nasdaq 100",
        description: "Largest non-financial Nasdaq listings",
        market: Market::Us,
        members: Members::List(NASDAQ_100),
    },
    IndexDefinition {
        key: "dow_jones_30",
        name: "Dow Jones 30",
        description: "Dow Jones Industrial Average",
        market: Market::Us,
        members: Members::List(DOW_JONES_30),
    },
    IndexDefinition {
        key: "magnificent_7",
        name: "Magnificent 7",
        description: "Largest US technology names",
        market: Market::Us,
        members: Members::List(MAGNIFICENT_7),
    },
    IndexDefinition {
        key: "us_tech",
        name: "US Tech",
        description: "US technology leaders",
        market: Market::Us,
        members: Members::List(US_TECH),
    },
    IndexDefinition {
        key: "us_financials",
        name: "US Financials",
        description: "US banks, brokers and insurers",
        market: Market::Us,
        members: Members::List(US_FINANCIALS),
    },
    IndexDefinition {
        key: "us_healthcare",
        name: "US Healthcare",
        description: "US healthcare and pharmaceutical companies",
        market: Market::Us,
        members: Members::List(US_HEALTHCARE),
    },
];

const NIFTY_50: &[&str] = &[
    "RELIANCE", "TCS", "HDFCBANK", "INFY", "ICICIBANK", "HINDUNILVR", "ITC", "SBIN",
    "BHARTIARTL", "KOTAKBANK", "LT", "HCLTECH", "AXISBANK", "ASIANPAINT", "MARUTI", "SUNPHARMA",
    "TITAN", "BAJFINANCE", "DMART", "ULTRACEMCO", "NTPC", "ONGC", "NESTLEIND", "WIPRO",
    "M&M", "POWERGRID", "JSWSTEEL", "TATAMOTORS", "ADANIENT", "ADANIPORTS", "TATASTEEL", "COALINDIA",
    "HINDALCO", "TECHM", "BAJAJFINSV", "GRASIM", "DIVISLAB", "BRITANNIA", "CIPLA", "DRREDDY",
    "APOLLOHOSP", "EICHERMOT", "TATACONSUM", "SBILIFE", "BPCL", "HEROMOTOCO", "INDUSINDBK", "BAJAJ-AUTO",
    "HDFCLIFE", "UPL",
];

const NIFTY_IT: &[&str] = &[
    "TCS", "INFY", "HCLTECH", "WIPRO", "TECHM", "LTIM", "MPHASIS", "COFORGE",
    "PERSISTENT", "LTTS",
];

const NIFTY_BANK: &[&str] = &[
    "HDFCBANK", "ICICIBANK", "KOTAKBANK", "AXISBANK", "SBIN", "INDUSINDBK", "BANDHANBNK", "FEDERALBNK",
    "IDFCFIRSTB", "PNB", "BANKBARODA", "AUBANK",
];

const NIFTY_PHARMA: &[&str] = &[
    "SUNPHARMA", "DRREDDY", "CIPLA", "DIVISLAB", "APOLLOHOSP", "LUPIN", "AUROPHARMA", "BIOCON",
    "TORNTPHARM", "ALKEM", "ABBOTINDIA", "IPCALAB", "GLENMARK", "LAURUSLABS", "ZYDUSLIFE",
];

const NIFTY_AUTO: &[&str] = &[
    "TATAMOTORS", "M&M", "MARUTI", "BAJAJ-AUTO", "HEROMOTOCO", "EICHERMOT", "BHARATFORG", "BALKRISIND",
    "MOTHERSON", "TVSMOTOR", "ASHOKLEY", "BOSCHLTD", "MRF", "EXIDEIND", "AMARAJABAT",
];

const NIFTY_FMCG: &[&str] = &[
    "HINDUNILVR", "ITC", "NESTLEIND", "BRITANNIA", "TATACONSUM", "DABUR", "MARICO", "GODREJCP",
    "COLPAL", "PGHH", "EMAMILTD", "VBL", "UBL", "MCDOWELL-N", "RADICO",
];

const NIFTY_METAL: &[&str] = &[
    "TATASTEEL", "JSWSTEEL", "HINDALCO", "COALINDIA", "VEDL", "JINDALSTEL", "SAIL", "NMDC",
    "APLAPOLLO", "NATIONALUM", "MOIL", "RATNAMANI", "WELCORP", "HINDCOPPER", "JSWENERGY",
];

const NIFTY_PSU_BANK: &[&str] = &[
    "SBIN", "PNB", "BANKBARODA", "CANBK", "UNIONBANK", "INDIANB", "IOB", "CENTRALBK",
    "BANKINDIA", "MAHABANK", "UCOBANK", "PSB",
];

const NIFTY_REALTY: &[&str] = &[
    "DLF", "GODREJPROP", "OBEROIRLTY", "PHOENIXLTD", "PRESTIGE", "BRIGADE", "SOBHA", "SUNTECK",
    "LODHA", "MAHLIFE",
];

const NIFTY_ENERGY: &[&str] = &[
    "RELIANCE", "ONGC", "NTPC", "POWERGRID", "BPCL", "IOC", "GAIL", "ADANIGREEN",
    "TATAPOWER", "ADANIENSOL",
];

const NIFTY_INFRA: &[&str] = &[
    "LT", "ADANIPORTS", "POWERGRID", "NTPC", "ULTRACEMCO", "GRASIM", "BHARTIARTL", "DLF",
    "SIEMENS", "ABB",
];

const NIFTY_MIDCAP_50: &[&str] = &[
    "MUTHOOTFIN", "PAGEIND", "VOLTAS", "INDIGO", "PIIND", "MFSL", "IDFCFIRSTB", "FEDERALBNK",
    "ASTRAL", "POLYCAB", "TRENT", "JUBLFOOD", "LALPATHLAB", "CUMMINSIND", "PERSISTENT", "COFORGE",
    "CROMPTON", "ESCORTS", "OBEROIRLTY", "GODREJPROP", "MRF", "SYNGENE", "INDIANB", "AUROPHARMA",
    "ACC", "AMBUJACEM", "ATUL", "BATAINDIA", "CANBK", "CONCOR", "DEEPAKNTR", "DIXON",
    "GLAND", "GMRINFRA", "GNFC", "GSPL", "HAL", "HINDPETRO", "ICICIGI", "IDEA",
    "IRCTC", "IRFC", "LICHSGFIN", "LTTS", "LUPIN", "MANAPPURAM", "MAXHEALTH", "METROPOLIS",
    "NAM-INDIA", "NATIONALUM",
];

const NIFTY_NEXT_50: &[&str] = &[
    "ADANIENSOL", "ADANIGREEN", "ADANIPOWER", "ATGL", "AWL", "BANKBARODA", "BEL", "BERGEPAINT",
    "BOSCHLTD", "CANBK", "CHOLAFIN", "COLPAL", "DLF", "GAIL", "GODREJCP", "HAL",
    "HAVELLS", "ICICIGI", "ICICIPRULI", "INDHOTEL", "INDIGO", "IOC", "IRFC", "JINDALSTEL",
    "JSWENERGY", "LICI", "LODHA", "MARICO", "MAXHEALTH", "NHPC", "NYKAA", "OFSS",
    "PAYTM", "PFC", "PIDILITIND", "PNB", "POLYCAB", "RECLTD", "SAIL", "SHREECEM",
    "SHRIRAMFIN", "SIEMENS", "SRF", "TATAPOWER", "TORNTPHARM", "TRENT", "UNIONBANK", "VBL",
    "VEDL", "ZOMATO",
];

const SP500_TOP50: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK-B",
    "UNH", "JNJ", "V", "XOM", "JPM", "PG", "MA", "HD",
    "CVX", "MRK", "ABBV", "LLY", "PEP", "COST", "KO", "AVGO",
    "WMT", "MCD", "CSCO", "TMO", "ACN", "ABT", "DHR", "VZ",
    "ADBE", "CRM", "NKE", "CMCSA", "NEE", "TXN", "PM", "UPS",
    "RTX", "INTC", "ORCL", "AMD", "HON", "IBM", "QCOM", "LOW",
    "SPGI", "CAT",
];

const NASDAQ_100: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "GOOG", "AMZN", "NVDA", "META", "TSLA",
    "AVGO", "COST", "ASML", "PEP", "CSCO", "AZN", "ADBE", "NFLX",
    "AMD", "TMUS", "TXN", "CMCSA", "INTC", "QCOM", "HON", "AMGN",
    "INTU", "AMAT", "ISRG", "BKNG", "SBUX", "VRTX", "MDLZ", "GILD",
    "ADI", "ADP", "LRCX", "REGN", "MU", "PANW", "PYPL", "SNPS",
    "KLAC", "CDNS", "MELI", "CSX", "ORLY", "MAR", "MRVL", "NXPI",
    "MNST", "FTNT", "CTAS", "PCAR", "WDAY", "ADSK", "CHTR", "DXCM",
    "KDP", "AEP", "MRNA", "KHC", "PAYX", "CPRT", "MCHP", "ODFL",
    "EXC", "ROST", "LULU", "IDXX", "FAST", "GEHC", "EA", "VRSK",
    "CTSH", "BKR", "CSGP", "FANG", "XEL", "ON", "DDOG", "ANSS",
    "ZS", "CDW", "GFS", "TTWO", "ILMN", "WBD", "BIIB", "DLTR",
    "WBA", "ALGN", "ENPH", "SIRI", "JD", "LCID", "ZM",
];

const DOW_JONES_30: &[&str] = &[
    "AAPL", "AMGN", "AXP", "BA", "CAT", "CRM", "CSCO", "CVX",
    "DIS", "DOW", "GS", "HD", "HON", "IBM", "INTC", "JNJ",
    "JPM", "KO", "MCD", "MMM", "MRK", "MSFT", "NKE", "PG",
    "TRV", "UNH", "V", "VZ", "WBA", "WMT",
];

const MAGNIFICENT_7: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA",
];

const US_TECH: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "AVGO",
    "ADBE", "CRM", "AMD", "INTC", "QCOM", "TXN", "AMAT", "LRCX",
    "MU", "SNPS", "CDNS", "KLAC", "NFLX", "PYPL", "NOW", "PANW",
    "INTU", "ORCL", "IBM", "CSCO", "DELL", "HPQ",
];

const US_FINANCIALS: &[&str] = &[
    "JPM", "BAC", "WFC", "GS", "MS", "C", "BLK", "SCHW",
    "AXP", "SPGI", "CB", "PNC", "USB", "TFC", "COF", "BK",
    "AIG", "MET", "PRU", "ALL",
];

const US_HEALTHCARE: &[&str] = &[
    "UNH", "JNJ", "LLY", "PFE", "ABBV", "MRK", "TMO", "ABT",
    "DHR", "BMY", "AMGN", "GILD", "VRTX", "REGN", "ISRG", "MDT",
    "SYK", "ZTS", "BDX", "CI",
];

const NIFTY_MIDCAP_100_EXTRA: &[&str] = &[
    "AARTIIND", "ABCAPITAL", "AJANTPHARM", "ALKYLAMINE", "ANGELONE", "APLAPOLLO", "BALRAMCHIN", "BHARATFORG",
    "BHEL", "BSE", "CANFINHOME", "CARBORUNIV", "CDSL", "CENTRALBK", "CLEAN", "COCHINSHIP",
    "CUB", "CUMMINSIND", "CYIENT", "DALBHARAT", "EMAMILTD", "ENDURANCE", "FACT", "FINCABLES",
    "FLUOROCHEM", "FORTIS", "FSL", "GESHIP", "GLAXO", "GLENMARK", "GUJGASLTD", "HEG",
    "HONAUT", "IPCALAB", "IRCTC", "ISEC", "IEX", "JKCEMENT", "JMFINANCIL", "JSL",
    "JUBLINGREA", "KAJARIACER", "KALYANKJIL", "KEI", "KEC",
];
