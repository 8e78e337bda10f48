//! ワークスペース内の翻訳カタログ（`.ts`）のインデックス
use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use ignore::WalkBuilder;
use tokio::sync::{
    RwLock,
    Semaphore,
};

use crate::catalog::{
    Catalog,
    CatalogSet,
    TsDocument,
};
use crate::config::{
    ConfigManager,
    FileMatcher,
};
use crate::format;
use crate::indexer::types::{
    IndexerError,
    LoadFailure,
};
use crate::language::detect_language_from_path;

/// デフォルトの並列数（CPU コア数の 80%、最低 1）
#[must_use]
pub fn default_num_threads() -> usize {
    (num_cpus::get() * 4 / 5).max(1)
}

/// ワークスペースの翻訳カタログを読み込んで保持する
#[derive(Clone, Debug, Default)]
pub struct WorkspaceIndexer {
    /// ファイルパス → 読み込んだドキュメント
    documents: Arc<RwLock<BTreeMap<PathBuf, TsDocument>>>,
    /// 読み込みに失敗したファイル
    failures: Arc<RwLock<Vec<LoadFailure>>>,
}

impl WorkspaceIndexer {
    /// 新しいインデクサーを作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ワークスペースをインデックス
    ///
    /// 読み込みに失敗したファイルは [`Self::failures`] に記録し、処理を続行する。
    /// 戻り値は読み込みに成功したファイル数。
    ///
    /// # Errors
    /// - ワークスペースルートが存在しない
    /// - 設定のパターンが不正
    pub async fn index_workspace(
        &self,
        workspace_path: &Path,
        config_manager: &ConfigManager,
    ) -> Result<usize, IndexerError> {
        tracing::debug!(workspace_path = %workspace_path.display(), "Indexing workspace");
        if !workspace_path.is_dir() {
            return Err(IndexerError::InvalidRoot(workspace_path.to_path_buf()));
        }

        let settings = config_manager.get_settings();
        let matcher = FileMatcher::new(workspace_path.to_path_buf(), settings)?;
        let files = Self::find_catalog_files(&matcher);

        let num_threads = settings.indexing.num_threads.unwrap_or_else(default_num_threads);
        let semaphore = Arc::new(Semaphore::new(num_threads));
        tracing::debug!(files = files.len(), num_threads, "Loading catalog files");

        // 並列処理でファイルを読み込み（同時実行数は num_threads まで）
        let futures: Vec<_> = files
            .into_iter()
            .map(|file| {
                let semaphore = Arc::clone(&semaphore);
                async move {
                    let _permit = semaphore.acquire().await;
                    self.index_file(&file).await
                }
            })
            .collect();

        let loaded = futures::future::join_all(futures)
            .await
            .into_iter()
            .filter(Result::is_ok)
            .count();

        tracing::debug!(loaded, "Workspace indexed");
        Ok(loaded)
    }

    /// 単一ファイルを読み込んでインデックスに追加
    ///
    /// 失敗した場合は [`Self::failures`] にも記録する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - TS 形式のパースエラー
    pub async fn index_file(&self, file_path: &Path) -> Result<(), IndexerError> {
        match Self::load_document(file_path).await {
            Ok(document) => {
                self.failures.write().await.retain(|failure| failure.path != file_path);
                self.documents.write().await.insert(file_path.to_path_buf(), document);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load catalog {:?}: {}", file_path, e);
                self.documents.write().await.remove(file_path);
                self.failures.write().await.push(LoadFailure::new(file_path.to_path_buf(), &e));
                Err(e)
            }
        }
    }

    async fn load_document(file_path: &Path) -> Result<TsDocument, IndexerError> {
        let content = tokio::fs::read_to_string(file_path)
            .await
            .map_err(|source| IndexerError::Io { path: file_path.to_path_buf(), source })?;
        let mut document = format::read_str(&content)
            .map_err(|source| IndexerError::Format { path: file_path.to_path_buf(), source })?;

        // ヘッダーに言語がない場合はファイル名から推測する
        if document.language.as_deref().is_none_or(str::is_empty) {
            document.language = detect_language_from_path(file_path);
            tracing::debug!(language = ?document.language, "Detected language from {:?}", file_path);
        }
        Ok(document)
    }

    /// カタログファイルを検索
    fn find_catalog_files(matcher: &FileMatcher) -> Vec<PathBuf> {
        let workspace_path = matcher.workspace_root();
        let mut found_files = Vec::new();

        // excludePatterns に一致するディレクトリは走査しない
        let walk_matcher = matcher.clone();
        let is_walked = move |entry: &ignore::DirEntry| {
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .path()
                .strip_prefix(walk_matcher.workspace_root())
                .ok()
                .is_none_or(|relative| !walk_matcher.is_excluded_relative(relative))
        };

        // ignore クレートでファイルを走査
        for result in WalkBuilder::new(workspace_path)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .filter_entry(is_walked)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            // ファイルのみを対象
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(workspace_path) else {
                continue;
            };
            if !matcher.is_catalog_file_relative(relative_path) {
                continue;
            }

            found_files.push(path.to_path_buf());
        }

        found_files.sort();
        found_files
    }

    /// 読み込んだドキュメントのスナップショット（パス順）
    pub async fn documents(&self) -> Vec<(PathBuf, TsDocument)> {
        self.documents
            .read()
            .await
            .iter()
            .map(|(path, document)| (path.clone(), document.clone()))
            .collect()
    }

    /// 読み込みに失敗したファイル
    pub async fn failures(&self) -> Vec<LoadFailure> {
        self.failures.read().await.clone()
    }

    /// 言語ごとのカタログを構築する
    ///
    /// 言語が不明なファイルと、重複エントリを含むファイルはスキップする。
    /// 同じ言語のファイルが複数ある場合はパス順で最初のものを使う。
    pub async fn catalog_set(&self) -> CatalogSet {
        let mut set = CatalogSet::new();
        for (path, document) in self.documents.read().await.iter() {
            let Some(language) = document.language.clone() else {
                tracing::warn!("Skipping {:?}: unknown language", path);
                continue;
            };
            if set.get(&language).is_some_and(|c| c.language() == Some(language.as_str())) {
                tracing::warn!("Skipping {:?}: another catalog for '{}' is loaded", path, language);
                continue;
            }
            match Catalog::from_document(document.clone()) {
                Ok(catalog) => {
                    set.insert(&language, Arc::new(catalog));
                }
                Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
            }
        }
        set
    }

    /// インデックスをクリア
    pub async fn clear(&self) {
        self.documents.write().await.clear();
        self.failures.write().await.clear();
    }
}
