//! 预导入模块，方便使用

pub use super::trabalhos::{
    ActiveModel as TrabalhoActiveModel, Entity as Trabalhos, Model as TrabalhoModel,
};
