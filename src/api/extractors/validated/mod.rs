/*!
 * Schema-validated request extractors
 *
 * Responsibility:
 * - services::validation の schema で body / headers を検証してから handler に渡す
 * - 失敗は AppError::Validation (422)
 */

mod core;

pub use self::core::{ValidatedHeaders, ValidatedJson};
