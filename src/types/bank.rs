/// Thai banks that appear as sending or receiving bank on a slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Bbl,
    Kbank,
    Ktb,
    Ttb,
    Scb,
    Bay,
    Kkp,
    Cimbt,
    Tisco,
    Uobt,
    Tcd,
    Lhfg,
    Icbct,
    Sme,
    Baac,
    Exim,
    Gsb,
    Ghb,
}

static BANKS: [(Bank, &str, &str); 18] = [
    (Bank::Bbl, "002", "BBL"),
    (Bank::Kbank, "004", "KBANK"),
    (Bank::Ktb, "006", "KTB"),
    (Bank::Ttb, "011", "TTB"),
    (Bank::Scb, "014", "SCB"),
    (Bank::Bay, "025", "BAY"),
    (Bank::Kkp, "069", "KKP"),
    (Bank::Cimbt, "022", "CIMBT"),
    (Bank::Tisco, "067", "TISCO"),
    (Bank::Uobt, "024", "UOBT"),
    (Bank::Tcd, "071", "TCD"),
    (Bank::Lhfg, "073", "LHFG"),
    (Bank::Icbct, "070", "ICBCT"),
    (Bank::Sme, "098", "SME"),
    (Bank::Baac, "034", "BAAC"),
    (Bank::Exim, "035", "EXIM"),
    (Bank::Gsb, "030", "GSB"),
    (Bank::Ghb, "033", "GHB"),
];

impl Bank {
    /// Looks up a three-digit bank code. Empty or unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        BANKS
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(bank, _, _)| *bank)
    }

    pub fn code(&self) -> &'static str {
        self.entry().1
    }

    pub fn abbreviation(&self) -> &'static str {
        self.entry().2
    }

    fn entry(&self) -> &'static (Bank, &'static str, &'static str) {
        // Every variant has a row in BANKS.
        BANKS
            .iter()
            .find(|(bank, _, _)| bank == self)
            .unwrap_or(&BANKS[0])
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}
