//! 言語コードの正規化と検出

use std::path::Path;

use crate::catalog::CatalogSet;
use crate::runtime::PluralRule;

/// Normalize language code (lowercase and replace - with _)
#[must_use]
pub fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// 正規化済みコードの主言語部分（`pt_br` → `pt`）
#[must_use]
pub fn primary_subtag(normalized: &str) -> &str {
    normalized.split('_').next().unwrap_or(normalized)
}

/// 既知の言語コードかどうか（複数形ルールを持つ言語を既知とみなす）
fn is_known_language(code: &str) -> bool {
    PluralRule::for_language(code).is_some()
}

/// Detect language from file path heuristically
///
/// ファイル名を `_` / `-` / `.` で分割し、末尾から言語コードを探します。
/// 見つからない場合は親ディレクトリ名を確認します。
///
/// # Examples
/// - `translations/admc_ru.ts` → `ru`
/// - `i18n/app_pt_BR.ts` → `pt_BR`
/// - `translations/de/app.ts` → `de`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let stem = file_path.file_stem()?.to_string_lossy();
    let parts: Vec<&str> = stem.split(['_', '-', '.']).filter(|p| !p.is_empty()).collect();

    // 地域付きコード（pt_BR）を優先する
    if let [.., language, region] = parts.as_slice()
        && region.len() == 2
        && is_known_language(language)
    {
        return Some(format!("{language}_{region}"));
    }
    if let Some(last) = parts.last()
        && is_known_language(last)
        && last.len() <= 3
    {
        return Some((*last).to_string());
    }

    file_path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| name.len() <= 6 && is_known_language(name))
}

/// 使用する言語を決定する
///
/// 優先順位: CLI 引数 → 設定ファイル → OS のロケール。
/// カタログのない候補はスキップする。ソース言語の候補に達した場合、
/// またはどの候補にもカタログがない場合は `None`（原文を表示）。
#[must_use]
pub fn resolve_language(
    cli_language: Option<&str>,
    configured_language: Option<&str>,
    source_language: &str,
    available: &CatalogSet,
) -> Option<String> {
    let candidates = [
        cli_language.map(str::to_string),
        configured_language.map(str::to_string),
        sys_locale::get_locale(),
    ];
    resolve_language_from(candidates, source_language, available)
}

fn resolve_language_from(
    candidates: impl IntoIterator<Item = Option<String>>,
    source_language: &str,
    available: &CatalogSet,
) -> Option<String> {
    let source = normalize_language_code(source_language);
    for candidate in candidates.into_iter().flatten() {
        if available.get(&candidate).is_some() {
            return Some(candidate);
        }
        if primary_subtag(&normalize_language_code(&candidate)) == primary_subtag(&source) {
            tracing::debug!("'{}' is the source language; using source text", candidate);
            return None;
        }
        tracing::debug!("No catalog for language '{}'", candidate);
    }
    None
}
