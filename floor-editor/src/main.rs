//! `floor-editor <floor_id>`: load a floor document and print its
//! validation report. Exits with status 1 when the layout has findings.

use floor_editor::{EditorConfig, FloorDocument, LayoutStore, init_logger_with_file};

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = EditorConfig::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let Some(floor_id) = std::env::args().nth(1) else {
        anyhow::bail!("usage: floor-editor <floor_id>");
    };

    // 2. 加载楼层文档
    let doc = FloorDocument::load(&config.floor_dir, &floor_id)?;
    let store = LayoutStore::from_document(doc, config)?;

    // 3. 校验并输出报告
    let report = store.validate_layout();
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_valid {
        tracing::warn!(floor_id = %floor_id, errors = ?report.errors, "Floor layout is invalid");
        std::process::exit(1);
    }
    Ok(())
}
