// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成9个导入测试数据集CSV文件
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use csv::{Writer, WriterBuilder};
use std::error::Error;
use std::fs::File;

// 联系人 CSV 表头（与目标字段键一致，自动映射可全部命中）
const CONTACT_HEADER: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "phone",
    "company",
    "status",
    "source",
    "notes",
];

// 商机 CSV 表头（amount 放在尾部，短行即可触发"金额缺失"路径）
const DEAL_HEADER: &[&str] = &["title", "contactId", "stage", "amount", "description"];

const FIRST_NAMES: &[&str] = &["Jane", "John", "Ann", "Bob", "Cat", "Dan", "Eve", "Max"];
const LAST_NAMES: &[&str] = &["Doe", "Smith", "Lee", "Ray", "Kim", "Fox", "Liu", "Chan"];
const COMPANIES: &[&str] = &["Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark"];
const STATUSES: &[&str] = &["lead", "qualified", "customer"];
const SOURCES: &[&str] = &["csv", "web", "referral", "event"];
const STAGES: &[&str] = &["lead", "qualified", "proposal", "negotiation", "won"];

// 联系人记录结构
#[derive(Clone)]
struct ContactRecord {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
    status: String,
    source: String,
    notes: String,
}

impl ContactRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.company.clone(),
            self.status.clone(),
            self.source.clone(),
            self.notes.clone(),
        ]
    }
}

// 商机记录结构
#[derive(Clone)]
struct DealRecord {
    title: String,
    contact_id: String,
    stage: String,
    amount: String,
    description: String,
}

impl DealRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.contact_id.clone(),
            self.stage.clone(),
            self.amount.clone(),
            self.description.clone(),
        ]
    }
}

// 生成正常联系人记录
fn generate_contact(index: usize) -> ContactRecord {
    ContactRecord {
        first_name: FIRST_NAMES[index % FIRST_NAMES.len()].to_string(),
        last_name: LAST_NAMES[(index / 3) % LAST_NAMES.len()].to_string(),
        email: format!("user{}@example.com", index + 1),
        phone: format!("555-{:04}", (index * 7) % 10000),
        company: COMPANIES[index % COMPANIES.len()].to_string(),
        status: STATUSES[index % STATUSES.len()].to_string(),
        source: SOURCES[index % SOURCES.len()].to_string(),
        notes: format!("imported batch row {}", index + 1),
    }
}

// 生成正常商机记录
fn generate_deal(index: usize) -> DealRecord {
    DealRecord {
        title: format!("Deal {:04}", index + 1),
        contact_id: format!("{}", (index % 50) + 1),
        stage: STAGES[index % STAGES.len()].to_string(),
        amount: format!("{}", 1000 + (index % 40) * 250),
        description: format!("opportunity {}", index + 1),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");

    std::fs::create_dir_all("tests/fixtures/datasets")?;

    // 1. 生成正常联系人数据 (100条)
    generate_contacts_normal()?;

    // 2. 生成联系人大数据集 (1000条)
    generate_contacts_large()?;

    // 3. 生成缺失必填字段的联系人数据
    generate_contacts_missing_required()?;

    // 4. 生成表头变体联系人数据
    generate_contacts_header_variants()?;

    // 5. 生成稀疏联系人数据
    generate_contacts_sparse()?;

    // 6. 生成正常商机数据 (50条)
    generate_deals_normal()?;

    // 7. 生成联系人ID非法的商机数据
    generate_deals_invalid_contact_id()?;

    // 8. 生成金额缺失的商机数据
    generate_deals_missing_amount()?;

    // 9. 生成混合问题数据
    generate_mixed_issues()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn generate_contacts_normal() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/01_contacts_normal.csv";
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CONTACT_HEADER)?;

    for i in 0..100 {
        let record = generate_contact(i);
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 01_contacts_normal.csv (100条)");
    Ok(())
}

fn generate_contacts_large() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/02_contacts_large.csv";
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CONTACT_HEADER)?;

    for i in 0..1000 {
        let record = generate_contact(i + 10000); // 邮箱避免与其他数据集冲突
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 02_contacts_large.csv (1000条)");
    Ok(())
}

fn generate_contacts_missing_required() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/03_contacts_missing_required.csv";
    let file = File::create(path)?;
    // 短行比表头少列，需要宽松模式
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(CONTACT_HEADER)?;

    // 正常记录 (10条)
    for i in 0..10 {
        let record = generate_contact(i + 20000);
        wtr.write_record(&record.to_row())?;
    }

    // 只有 firstName 一列的短行 (5条): 行内缺 lastName 键，导入时校验失败
    for i in 0..5 {
        let record = generate_contact(i + 20010);
        wtr.write_record(&record.to_row()[..1])?;
    }

    wtr.flush()?;
    println!("✓ 生成 03_contacts_missing_required.csv (15条，5条缺必填)");
    Ok(())
}

fn generate_contacts_header_variants() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/04_contacts_header_variants.csv";
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    // 带空格的表头无法自动命中（"first name" 不包含 "firstname"），
    // 包含式表头可以命中（"customer email" 包含 "email"）
    wtr.write_record([
        "First Name",
        "Last Name",
        "Customer Email",
        "Phone",
        "companyName",
        "Status",
        "Lead Source",
        "Notes",
    ])?;

    for i in 0..10 {
        let record = generate_contact(i + 30000);
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 04_contacts_header_variants.csv (10条，表头需手工映射)");
    Ok(())
}

fn generate_contacts_sparse() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/05_contacts_sparse.csv";
    let file = File::create(path)?;
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(CONTACT_HEADER)?;

    // 可选列为空字符串 (4条): 键存在但值为空
    for i in 0..4 {
        let mut record = generate_contact(i + 40000);
        record.email = "".to_string();
        record.phone = "".to_string();
        record.notes = "".to_string();
        wtr.write_record(&record.to_row())?;
    }

    // 只有前两列的短行 (4条): 尾部可选列键不存在
    for i in 0..4 {
        let record = generate_contact(i + 40004);
        wtr.write_record(&record.to_row()[..2])?;
    }

    // 值带首尾空格 (4条): 解析按原文保留
    for i in 0..4 {
        let mut record = generate_contact(i + 40008);
        record.first_name = format!(" {} ", record.first_name);
        record.company = format!("{} ", record.company);
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 05_contacts_sparse.csv (12条，稀疏/短行/带空格)");
    Ok(())
}

fn generate_deals_normal() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/06_deals_normal.csv";
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(DEAL_HEADER)?;

    for i in 0..50 {
        let record = generate_deal(i);
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 06_deals_normal.csv (50条)");
    Ok(())
}

fn generate_deals_invalid_contact_id() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/07_deals_invalid_contact_id.csv";
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(DEAL_HEADER)?;

    // 正常记录 (6条)
    for i in 0..6 {
        let record = generate_deal(i + 50000);
        wtr.write_record(&record.to_row())?;
    }

    // contactId 非整数 (4条): 逐行校验失败
    for (i, bad_id) in ["abc", "12.5", "", "9e3"].iter().enumerate() {
        let mut record = generate_deal(i + 50006);
        record.contact_id = bad_id.to_string();
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 07_deals_invalid_contact_id.csv (10条，4条ID非法)");
    Ok(())
}

fn generate_deals_missing_amount() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/08_deals_missing_amount.csv";
    let file = File::create(path)?;
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(DEAL_HEADER)?;

    // 带金额的完整行 (5条)
    for i in 0..5 {
        let record = generate_deal(i + 60000);
        wtr.write_record(&record.to_row())?;
    }

    // 只有前三列的短行 (5条): amount 键不存在，落库为 NULL，活动显示 ($N/A)
    for i in 0..5 {
        let record = generate_deal(i + 60005);
        wtr.write_record(&record.to_row()[..3])?;
    }

    wtr.flush()?;
    println!("✓ 生成 08_deals_missing_amount.csv (10条，5条无金额)");
    Ok(())
}

fn generate_mixed_issues() -> Result<(), Box<dyn Error>> {
    let path = "tests/fixtures/datasets/09_mixed_issues.csv";
    let file = File::create(path)?;
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record(CONTACT_HEADER)?;

    // 正常数据 (10条)
    for i in 0..10 {
        let record = generate_contact(i + 70000);
        wtr.write_record(&record.to_row())?;
    }

    // 缺必填字段的短行 (3条)
    for i in 0..3 {
        let record = generate_contact(i + 70010);
        wtr.write_record(&record.to_row()[..1])?;
    }

    // 邮箱为空 (3条)
    for i in 0..3 {
        let mut record = generate_contact(i + 70013);
        record.email = "".to_string();
        wtr.write_record(&record.to_row())?;
    }

    // 重复邮箱 (2条): 与前面正常数据同邮箱，导入不拦截
    for i in 0..2 {
        let record = generate_contact(i + 70000);
        wtr.write_record(&record.to_row())?;
    }

    // 值带空格 (2条)
    for i in 0..2 {
        let mut record = generate_contact(i + 70015);
        record.last_name = format!(" {}", record.last_name);
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 09_mixed_issues.csv (20条，混合问题)");
    Ok(())
}
