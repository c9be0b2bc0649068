/// 编辑器配置 - 楼面布局编辑器的所有可调参数
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (见 [`EditorConfig::from_env`])：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | GRID_SIZE | 8 | 吸附网格 |
/// | CANVAS_WIDTH | 1200 | 画布宽度 (maxX) |
/// | CANVAS_HEIGHT | 800 | 画布高度 (maxY) |
/// | MIN_TABLE_SIZE | 40 | 桌台最小边长 |
/// | DEFAULT_TABLE_SIZE | 60 | 默认边长 |
/// | DEFAULT_CAPACITY | 4 | 默认座位数 |
/// | HISTORY_DEPTH | 20 | 撤销栈深度 |
/// | FLOOR_DIR | ./floors | 楼面文档目录 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
///
/// # 示例
///
/// ```ignore
/// CANVAS_WIDTH=1600 HISTORY_DEPTH=50 floor-editor main-hall
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// 吸附网格单位
    pub grid_size: f64,
    /// 画布边界
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// resize 的下限 (宽、高各自)
    pub min_table_size: f64,
    /// 圆桌/方桌默认边长，长桌为两倍宽
    pub default_table_size: f64,
    pub default_capacity: i32,
    /// 撤销栈最多保留的快照数
    pub history_depth: usize,
    /// 楼面文档目录
    pub floor_dir: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl EditorConfig {
    /// 从环境变量加载配置
    ///
    /// 未设置或无法解析的变量使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            grid_size: env_parse("GRID_SIZE").unwrap_or(defaults.grid_size),
            canvas_width: env_parse("CANVAS_WIDTH").unwrap_or(defaults.canvas_width),
            canvas_height: env_parse("CANVAS_HEIGHT").unwrap_or(defaults.canvas_height),
            min_table_size: env_parse("MIN_TABLE_SIZE").unwrap_or(defaults.min_table_size),
            default_table_size: env_parse("DEFAULT_TABLE_SIZE")
                .unwrap_or(defaults.default_table_size),
            default_capacity: env_parse("DEFAULT_CAPACITY").unwrap_or(defaults.default_capacity),
            history_depth: env_parse("HISTORY_DEPTH").unwrap_or(defaults.history_depth),
            floor_dir: std::env::var("FLOOR_DIR").unwrap_or(defaults.floor_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().or(defaults.log_dir),
        }
    }

    /// 使用自定义画布尺寸
    ///
    /// 常用于测试场景
    pub fn with_canvas(width: f64, height: f64) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 8.0,
            canvas_width: 1200.0,
            canvas_height: 800.0,
            min_table_size: 40.0,
            default_table_size: 60.0,
            default_capacity: 4,
            history_depth: 20,
            floor_dir: "./floors".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
