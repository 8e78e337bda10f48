//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::catalog::{
    Message,
    Translation,
};

/// 単数形の完了済みメッセージを作成する
pub(crate) fn plain(source: &str, translation: &str) -> Message {
    Message::new(source, Translation::Plain(translation.to_string()))
}

/// 複数形（numerus）の完了済みメッセージを作成する
pub(crate) fn plural(source: &str, forms: &[&str]) -> Message {
    Message::new(source, Translation::Plural(forms.iter().map(ToString::to_string).collect()))
}
