// ==========================================
// 导入测试数据到数据库
// ==========================================
// 用途: 用完整导入管道（解析->映射->预览->提交）灌入数据集CSV
// 用法: import_test_data <csv文件> [contacts|deals] [db路径]
// ==========================================

use connect_crm_import::app::{get_default_db_path, AppState};
use connect_crm_import::domain::EntityKind;
use connect_crm_import::logging;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let csv_path = args
        .get(1)
        .cloned()
        .ok_or("用法: import_test_data <csv文件> [contacts|deals] [db路径]")?;
    let entity_kind: EntityKind = args.get(2).map(|s| s.as_str()).unwrap_or("contacts").parse()?;
    let db_path = args.get(3).cloned().unwrap_or_else(get_default_db_path);

    println!("开始导入测试数据...");
    println!("  - 数据文件: {}", csv_path);
    println!("  - 目标实体: {}", entity_kind);
    println!("  - 数据库: {}", db_path);

    let state = AppState::new(db_path)?;
    let mut session = state.new_import_session(entity_kind)?;

    // 第一步: 上传解析
    session.load_csv_path(&csv_path)?;
    println!("✓ 解析完成: {} 行数据", session.row_count());
    println!("  表头: {}", session.headers().join(", "));

    // 第二步: 字段映射（自动建议，* 为必填字段）
    println!("自动映射结果:");
    for field in session.fields() {
        let source = session.mapping().header_for(&field.key).unwrap_or("(未映射)");
        let mark = if field.required { "*" } else { " " };
        println!("  {}{:<12} <- {}", mark, field.key, source);
    }

    // 第三步: 预览
    session.continue_to_preview().await?;
    println!("预览前 {} 行:", session.preview().len());
    for (i, record) in session.preview().iter().enumerate() {
        let cells: Vec<String> = record.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("  [{}] {}", i + 1, cells.join(", "));
    }

    // 第四步: 提交整批（预览只截取展示，提交始终是全量行）
    let response = session.commit().await?;
    println!("✓ {}", response.message);

    // 落库结果核对
    println!("✓ 数据导入完成！");
    println!("  - 联系人总数: {}", state.contact_repo.count()?);
    println!("  - 商机总数: {}", state.deal_repo.count()?);
    println!("  - 活动总数: {}", state.activity_repo.count()?);

    Ok(())
}
