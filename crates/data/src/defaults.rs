/// Universe used to seed an empty symbol store: large-cap US equities,
/// growth names, and sector/country/bond ETFs.
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "AAPL", "ABBV", "ACHR", "ADBE", "ADSK", "AFRM", "AIG", "ALB", "AMAT", "AMD", "AMZN",
    "ANET", "APP", "ARKG", "ARKK", "ARKX", "ASML", "ASTS", "AVAV", "AVGO", "BA", "BABA", "BAX",
    "BNTX", "CCL", "CEG", "COF", "COHR", "COIN", "COST", "CQQQ", "CRM", "CRSP", "CRWD", "CSCO",
    "CVNA", "CVS", "DE", "DECK", "DELL", "DIS", "DOCU", "EMB", "ENPH", "ERO", "EWZ", "EZU",
    "FCX", "FLY", "FNGS", "GBTC", "GDRX", "GDX", "GE", "GLD", "GLW", "GOOG", "HIMS", "HOOD",
    "HUBS", "HWM", "HYG", "IBM", "INDA", "INMD", "INTU", "IONQ", "ISRG", "JD", "JETS", "JPM",
    "LEMB", "LHX", "LLY", "LQD", "MCHI", "MDT", "META", "MGM", "MP", "MRNA", "MSFT", "MSTR",
    "NEE", "NET", "NEU", "NFLX", "NOW", "NUGT", "NVDA", "PFE", "PINS", "PL", "PLTR", "PYPL",
    "QS", "RBLX", "RKLB", "ROBO", "RXRX", "SAP", "SE", "SHOP", "SHY", "SMCI", "SNAP", "SNOW",
    "SCCO", "SO", "SOFI", "SOUN", "SOXX", "SPOT", "SRAD", "STX", "TDOC", "TEAM", "TEM", "TER",
    "TJX", "TLRY", "TLT", "TMF", "TMO", "TMV", "TSLA", "TTD", "TWST", "TXN", "U", "UNH", "UPS",
    "URNM", "V", "WYNN", "XLE", "XLF", "XME", "XOP", "XPEV", "ZM",
];

#[cfg(test)]
mod tests {
    use super::*;
    use reversal_core::normalize_symbol;
    use std::collections::BTreeSet;

    #[test]
    fn defaults_are_normalized_and_unique() {
        let unique: BTreeSet<_> = DEFAULT_SYMBOLS.iter().collect();
        assert_eq!(unique.len(), DEFAULT_SYMBOLS.len());
        for symbol in DEFAULT_SYMBOLS {
            assert_eq!(normalize_symbol(symbol).as_deref(), Ok(*symbol));
        }
    }
}
