//! Project Queries

/// 列出所有项目（按创建时间倒序）
#[derive(Debug, Clone)]
pub struct ListProjects;

/// 查询 AI 服务配置状态
#[derive(Debug, Clone)]
pub struct CheckAiProvider;
