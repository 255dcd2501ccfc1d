//! 表达式与条件求值模块
//! - 本地化比较运算符求值
//! - 绑定公式的三段式算术求值

pub mod compare;
pub mod formula;

pub use compare::compare;
pub use formula::evaluate_formula;
