/*
 * Responsibility
 * - GET / (疎通用)
 */
pub async fn hi() -> &'static str {
    "Hi"
}
