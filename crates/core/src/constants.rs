use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest gap tolerated between the event-derived balance and the ledger balance
pub const RECONCILIATION_TOLERANCE: Decimal = dec!(0.01);

/// Minimum deposit accepted by the deposit form, in USD
pub const MIN_DEPOSIT: Decimal = dec!(10);

/// Minimum payout accepted by the payout form, in USD
pub const MIN_PAYOUT: Decimal = dec!(50);

/// Shortest wallet address the payout form accepts
pub const MIN_WALLET_ADDRESS_LEN: usize = 20;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Crypto currencies offered by the deposit form (lowercase, as the payment provider expects)
pub const DEPOSIT_CURRENCIES: [&str; 7] = ["btc", "eth", "usdt", "usdc", "ltc", "trx", "bnb"];

/// Crypto currencies offered by the payout form
pub const PAYOUT_CURRENCIES: [&str; 7] = ["BTC", "ETH", "USDT", "USDC", "LTC", "TRX", "BNB"];

/// Only crypto rails are wired up on the client
pub const CRYPTO_PAYMENT_METHOD: &str = "crypto";

/// Minimum age for KYC applicants
pub const KYC_MIN_AGE_YEARS: i32 = 18;
