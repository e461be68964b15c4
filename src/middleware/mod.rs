/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer 検証, http: request id / trace / limit / timeout
 */
pub mod auth;
pub mod http;
