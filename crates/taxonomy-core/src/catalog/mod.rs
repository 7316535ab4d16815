//! # Catalog Module
//!
//! 出品・プロフィール編集フォームが参照する設備カテゴリツリー
//! （Category → Subcategory → Item）を構築する。
//!
//! ## パイプライン
//!
//! 1. **normalize**: 形の揃っていない生レコードを正規ツリーに変換
//! 2. **merge**: 追加データを基本ツリーにIDベースで統合
//! 3. **split**: 複合カテゴリを分割テーブルに従って複製
//! 4. **specialize**: Correias / Transportadores のアイテムをキーワードで振り分け
//! 5. **dedupe**: 全階層で重複IDを除去（先勝ち、順序保持）
//!
//! ## モジュール構成
//!
//! - `ident`: 名前からの識別子導出
//! - `model`: ツリーのノード型
//! - `builtin`: 埋め込みの生テーブル
//! - `source`: リモートソース
//! - `snapshot`: 構築済みカタログと参照系クエリ
//! - `pipeline`: ステージ合成とキャッシュ
//!
//! ## 使用例
//!
//! ```rust
//! use taxonomy_core::catalog::TaxonomyContext;
//!
//! let ctx = TaxonomyContext::builtin();
//! let handle = ctx.handle();
//! assert!(!handle.is_loading());
//!
//! let catalog = handle.catalog();
//! assert!(catalog.category("correias").is_some());
//! assert!(catalog.category("transportadores").is_some());
//! assert!(catalog.category("correias-e-transportadores").is_none());
//! ```
//!
//! ### リモートソース（外部依存あり）
//!
//! ```rust,ignore
//! use taxonomy_core::catalog::{JsonFileSource, TaxonomyContext};
//!
//! let ctx = TaxonomyContext::builtin();
//! let source = JsonFileSource::new("categorias.json");
//!
//! // 失敗してもローカルのツリーがそのまま使われる
//! let handle = ctx.load(Some(&source));
//! ```

mod builtin;
mod dedupe;
mod ident;
mod merge;
mod model;
mod normalize;
mod pipeline;
mod snapshot;
mod source;
mod specialize;
mod split;

// Re-exports
pub use builtin::{builtin_base, builtin_extras};
pub use dedupe::{dedupe_items, dedupe_subcategories, dedupe_tree};
pub use ident::{derive_id, is_blank_id};
pub use merge::{merge_trees, merge_trees_with_report, MergeReport};
pub use model::{Category, Item, Subcategory};
pub use normalize::{
    first_match, normalize, normalize_record, FieldStrategy, CATEGORY_CHILD_STRATEGIES,
    GENERAL_SUBCATEGORY, ITEM_STRATEGIES, NAME_FIELDS,
};
pub use pipeline::{
    fingerprint, CatalogHandle, LogObserver, Pipeline, RefreshObserver, TaxonomyContext,
};
pub use snapshot::{Catalog, CatalogOption, CatalogSource, CatalogStats, ItemPath};
pub use source::{documents_from, JsonFileSource, RemoteSource};
pub use specialize::{
    specialize, specialize_with, Partition, Side, SpecializationRule, BELT_KEYWORD,
    SPECIALIZATION_RULES,
};
pub use split::{
    collapse, expand_with, split_categories, split_with, SplitCategory, SplitRule, SPLIT_TABLE,
};
