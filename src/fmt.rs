/// Shown in place of an amount that can't be formatted (NaN, infinity).
pub const NOT_A_PRICE: &str = "\u{2014}";

/// One locale's convention for writing a currency amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub locale: &'static str,
    pub code: &'static str,
    pub symbol: &'static str,
    pub symbol_after: bool,
    pub group_sep: char,
    pub decimal_sep: char,
    pub fraction_digits: usize,
}

impl CurrencyFormat {
    /// Vietnamese dong: `1.000.000 ₫`. The dong has no subunit in use.
    pub const VI_VN: CurrencyFormat = CurrencyFormat {
        locale: "vi-VN",
        code: "VND",
        symbol: "\u{20ab}",
        symbol_after: true,
        group_sep: '.',
        decimal_sep: ',',
        fraction_digits: 0,
    };

    /// US dollars: `$1,000,000.00`.
    pub const EN_US: CurrencyFormat = CurrencyFormat {
        locale: "en-US",
        code: "USD",
        symbol: "$",
        symbol_after: false,
        group_sep: ',',
        decimal_sep: '.',
        fraction_digits: 2,
    };

    /// Resolve a locale tag (`vi-VN`, `en_us`, ...). Unknown tags fall back to
    /// the default.
    pub fn for_locale(tag: &str) -> CurrencyFormat {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "vi-vn" | "vi" => Self::VI_VN,
            "en-us" | "en" => Self::EN_US,
            _ => Self::default(),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::VI_VN
    }
}

/// Format an amount per the given locale convention.
pub fn currency(amount: f64, format: &CurrencyFormat) -> String {
    if !amount.is_finite() {
        return NOT_A_PRICE.to_string();
    }

    // `{:.N}` rounds half to even; prices round half away from zero
    let scale = 10f64.powi(format.fraction_digits as i32);
    let scaled = amount.abs() * scale;
    let rounded = if scaled.is_finite() { scaled.round() / scale } else { amount.abs() };
    let fixed = format!("{:.*}", format.fraction_digits, rounded);
    let (int_part, dec_part) = match fixed.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(format.group_sep);
        }
        grouped.push(c);
    }
    let mut number: String = grouped.chars().rev().collect();
    if let Some(dec) = dec_part {
        number.push(format.decimal_sep);
        number.push_str(dec);
    }

    // -0.001 rounds to zero; don't print "-0 ₫"
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    if format.symbol_after {
        format!("{sign}{number}\u{a0}{}", format.symbol)
    } else {
        format!("{sign}{}{number}", format.symbol)
    }
}

/// Human-readable file size: 512 B, 1.5 KB, 2.0 MB
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
