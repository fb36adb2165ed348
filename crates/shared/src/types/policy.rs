//! Tenant-level reporting policies.

use serde::{Deserialize, Serialize};

/// Which order date decides the reporting period an order's revenue lands in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionPolicy {
    /// Recognize on delivery (accrual default).
    #[default]
    DeliveryDate,
    /// Recognize on the invoice date.
    InvoiceDate,
    /// Recognize on order creation, as the dashboard widgets do.
    CreatedDate,
}

/// Where fuel cost comes from when building a P&L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelAccounting {
    /// Fuel is booked as a `fuel` trip expense; fuel log entries are informational.
    #[default]
    TripExpenses,
    /// Fuel log entries are the cost source; `fuel` trip expenses are ignored.
    FuelLog,
}

impl std::fmt::Display for RecognitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeliveryDate => write!(f, "delivery_date"),
            Self::InvoiceDate => write!(f, "invoice_date"),
            Self::CreatedDate => write!(f, "created_date"),
        }
    }
}

impl std::fmt::Display for FuelAccounting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripExpenses => write!(f, "trip_expenses"),
            Self::FuelLog => write!(f, "fuel_log"),
        }
    }
}
