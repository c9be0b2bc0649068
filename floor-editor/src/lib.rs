//! Floor Editor - 餐厅楼层平面图编辑核心
//!
//! # 架构概述
//!
//! 本 crate 持有一个楼层的桌台布局，并提供：
//!
//! - **几何** (`geometry`): 网格吸附、画布约束、重叠与相邻判定
//! - **布局存储** (`store`): 桌台/区域/装饰物的增删改、选中状态、事件订阅
//! - **撤销/重做** (`history`): 有界快照栈
//! - **校验** (`validation`): 重叠、重复、容量、越界诊断
//! - **并台/拆台** (`merge`): 相邻桌台合并，拆台恢复原始几何
//! - **持久化** (`document`): 楼层文档 JSON 读写
//! - **扫描导入** (`scan_import`): 识别结果转为普通编辑操作
//!
//! # 模块结构
//!
//! ```text
//! floor-editor/src/
//! ├── core/          # 配置
//! ├── store/         # LayoutStore、事件、快照、错误
//! ├── utils/         # 日志
//! ├── geometry.rs
//! ├── history.rs
//! ├── merge.rs
//! ├── validation.rs
//! ├── document.rs
//! └── scan_import.rs
//! ```

pub mod core;
pub mod document;
pub mod geometry;
pub mod history;
pub mod merge;
pub mod scan_import;
pub mod store;
pub mod utils;
pub mod validation;

// Re-export 公共类型
pub use core::EditorConfig;
pub use document::{DOCUMENT_VERSION, DocumentError, DocumentResult, FloorDocument};
pub use geometry::{Direction, Rect};
pub use history::CommandHistory;
pub use scan_import::{CandidateKind, ImportSummary, ScanCandidate, import_scan};
pub use store::{LayoutError, LayoutEvent, LayoutResult, LayoutStore, SubscriptionId};
pub use validation::{ValidationCode, ValidationReport, validate_tables};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
