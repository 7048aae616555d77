use serde::Deserialize;

// 创建/编辑作品表单
//
// 缺省的文本字段为空字符串，painel 缺省为 0。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrabalhoForm {
    pub aluno: String,
    pub orientador: String,
    pub areas: String,
    pub titulo: String,
    pub avaliador1: String,
    pub avaliador2: String,
    pub painel: i64,
}

impl TrabalhoForm {
    /// 去除所有文本字段首尾空白
    pub fn trimmed(self) -> Self {
        Self {
            aluno: self.aluno.trim().to_string(),
            orientador: self.orientador.trim().to_string(),
            areas: self.areas.trim().to_string(),
            titulo: self.titulo.trim().to_string(),
            avaliador1: self.avaliador1.trim().to_string(),
            avaliador2: self.avaliador2.trim().to_string(),
            painel: self.painel,
        }
    }

    /// 手动录入校验：展板编号不能为负
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.painel < 0 {
            return Err("painel must be zero or greater");
        }
        Ok(())
    }
}

// 作品列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrabalhoListParams {
    pub q: Option<String>,
}

// 单条作品 / 二维码查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrabalhoLinkParams {
    pub base_url: Option<String>,
}

// 导入参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrabalhoImportParams {
    #[serde(default)]
    pub preview: bool,
}

// 导出参数
#[derive(Debug, Clone, Deserialize)]
pub struct TrabalhoExportParams {
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// 详情页 / 首页查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailPageParams {
    pub id: Option<String>,
}

// 打印卡片查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardsPageParams {
    // 逗号分隔的 ID 列表
    pub ids: Option<String>,
    pub cols: Option<usize>,
    pub base_url: Option<String>,
}

impl CardsPageParams {
    pub fn id_list(&self) -> Vec<String> {
        self.ids
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 每行卡片数，限制在 1..=5，默认 3
    pub fn columns(&self) -> usize {
        self.cols.unwrap_or(3).clamp(1, 5)
    }
}
