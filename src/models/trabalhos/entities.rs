use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trabalho {
    // 记录ID（UUID v4）
    pub id: String,
    // 学生
    pub aluno: String,
    // 导师
    pub orientador: String,
    // 学科领域
    pub areas: String,
    // 标题
    pub titulo: String,
    // 评审人 1
    pub avaliador1: String,
    // 评审人 2
    pub avaliador2: String,
    // 展板编号
    pub painel: i64,
    // 创建时间（本地时间，精确到秒）
    pub created_at: String,
}

impl Trabalho {
    /// 用表单内容创建新记录，生成新的 ID 和创建时间
    pub fn new(form: super::requests::TrabalhoForm) -> Self {
        let form = form.trimmed();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            aluno: form.aluno,
            orientador: form.orientador,
            areas: form.areas,
            titulo: form.titulo,
            avaliador1: form.avaliador1,
            avaliador2: form.avaliador2,
            painel: form.painel,
            created_at: now_timestamp(),
        }
    }

    /// 用表单内容覆盖可变字段，id 与 created_at 保持不变
    pub fn apply(&mut self, form: super::requests::TrabalhoForm) {
        let form = form.trimmed();
        self.aluno = form.aluno;
        self.orientador = form.orientador;
        self.areas = form.areas;
        self.titulo = form.titulo;
        self.avaliador1 = form.avaliador1;
        self.avaliador2 = form.avaliador2;
        self.painel = form.painel;
    }

    /// 是否匹配搜索词（学生、标题、导师、领域，不区分大小写）
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.aluno, &self.titulo, &self.orientador, &self.areas]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// 当前本地时间，格式 `YYYY-MM-DDTHH:MM:SS`
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trabalhos::requests::TrabalhoForm;

    fn form(aluno: &str, painel: i64) -> TrabalhoForm {
        TrabalhoForm {
            aluno: aluno.to_string(),
            titulo: "  Sensores de baixo custo  ".to_string(),
            painel,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_generates_id_and_trims() {
        let a = Trabalho::new(form(" Ana ", 5));
        let b = Trabalho::new(form("Ana", 5));
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.aluno, "Ana");
        assert_eq!(a.titulo, "Sensores de baixo custo");
        assert_eq!(a.created_at.len(), "2025-08-29T21:43:21".len());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut record = Trabalho::new(form("Ana", 5));
        let (id, created_at) = (record.id.clone(), record.created_at.clone());
        record.apply(form("Bea", 2));
        assert_eq!(record.id, id);
        assert_eq!(record.created_at, created_at);
        assert_eq!(record.aluno, "Bea");
        assert_eq!(record.painel, 2);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let mut record = Trabalho::new(form("Ana Souza", 1));
        record.areas = "Física Aplicada".to_string();
        assert!(record.matches("ana"));
        assert!(record.matches("FÍSICA"));
        assert!(record.matches("sensores"));
        assert!(record.matches(""));
        assert!(!record.matches("química"));
    }
}
