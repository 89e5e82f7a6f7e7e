pub mod contact;
pub mod line;
pub mod phone;
pub mod plan;
pub mod result;
pub mod strategy;
pub mod table;

pub use contact::{is_plausible_name, ContactCandidate, MAX_NAME_TOKENS, UNKNOWN_NAME};
pub use line::{LineRecord, Point};
pub use phone::{normalize_phone, NanpTrunkPolicy, PhoneNormalizer};
pub use plan::{NumberingPlan, NANP_COUNTRY_CODE};
pub use result::{ContactRow, ErrorRow, ResultRow, NO_CONTACT_NAME};
pub use strategy::{
    default_scan_strategies, default_strategies, parse_strategy_list, StrategyName,
    ALL_FAILED_STRATEGY, DEFAULT_SCAN_STRATEGIES, DEFAULT_STRATEGIES,
};
pub use table::{CellValue, NormalizedRow, NormalizedTable, Table, NORMALIZED_PHONE_COLUMN};
