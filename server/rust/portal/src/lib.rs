pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod usecase;

/// テスト用スタブとヘルパー（統合テストから利用）
pub mod test_support;
