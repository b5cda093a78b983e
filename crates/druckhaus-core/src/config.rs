// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pricing configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-page rates used by the price calculator.
///
/// All values are currency-agnostic fixed-point decimals in the shop's
/// minor unit. The defaults are the shop's published rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceList {
    /// Base rate per black-and-white page.
    pub bw_per_page: Decimal,
    /// Base rate per colour page.
    pub color_per_page: Decimal,
    /// Added to the base rate per page for double-sided jobs.
    pub double_sided_surcharge: Decimal,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            bw_per_page: Decimal::new(150, 2),
            color_per_page: Decimal::new(400, 2),
            double_sided_surcharge: Decimal::new(250, 2),
        }
    }
}
