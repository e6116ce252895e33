// src/domain/department_hierarchy.rs

//! 部門のフラットな一覧から木構造（森）を組み立てる純粋関数群
//!
//! ストアには一切触れません。呼び出し側が全件を読み込んだうえで渡します。

use super::department_model;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// 階層ビュー用の部門ノード（`children` は永続化されない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentNode {
    pub id: i32,
    pub name: String,
    pub parent_department_id: Option<i32>,
    pub children: Vec<DepartmentNode>,
}

impl DepartmentNode {
    /// 自身を含む部分木のノード数
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DepartmentNode::count).sum::<usize>()
    }
}

impl From<department_model::Model> for DepartmentNode {
    fn from(model: department_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_department_id: model.parent_department_id,
            children: Vec::new(),
        }
    }
}

/// 親ID -> 子ID のグルーピング（入力順を保持）
fn group_children<'a, I>(departments: I) -> HashMap<i32, Vec<i32>>
where
    I: IntoIterator<Item = &'a department_model::Model>,
{
    let mut children_of: HashMap<i32, Vec<i32>> = HashMap::new();
    for dept in departments {
        if let Some(parent_id) = dept.parent_department_id {
            children_of.entry(parent_id).or_default().push(dept.id);
        }
    }
    children_of
}

/// フラットな部門一覧から森を構築する
///
/// * 親を持たない部門はルートになる（入力順）
/// * 子は親の下に入力順で並ぶ
/// * 親IDに対応する行が存在しない部門（競合で孤立したもの）はルートとして扱う
/// * 閉路に含まれてどのルートからも到達できない部門も、入力順でルートとして追加する
///
/// 各部門は高々一度しか実体化されないため、閉路があっても停止する。
pub fn build_hierarchy(all: Vec<department_model::Model>) -> Vec<DepartmentNode> {
    let known: HashSet<i32> = all.iter().map(|d| d.id).collect();
    let order: Vec<i32> = all.iter().map(|d| d.id).collect();

    let mut root_ids = Vec::new();
    let mut linked = Vec::with_capacity(all.len());
    for dept in &all {
        match dept.parent_department_id {
            Some(parent_id) if parent_id != dept.id && known.contains(&parent_id) => {
                linked.push(dept)
            }
            _ => root_ids.push(dept.id),
        }
    }
    let children_of = group_children(linked);

    let mut pending: HashMap<i32, department_model::Model> =
        all.into_iter().map(|d| (d.id, d)).collect();

    let mut forest: Vec<DepartmentNode> = root_ids
        .into_iter()
        .filter_map(|id| materialize(id, &mut pending, &children_of))
        .collect();

    if !pending.is_empty() {
        for id in order {
            if let Some(node) = materialize(id, &mut pending, &children_of) {
                forest.push(node);
            }
        }
    }

    forest
}

fn materialize(
    id: i32,
    pending: &mut HashMap<i32, department_model::Model>,
    children_of: &HashMap<i32, Vec<i32>>,
) -> Option<DepartmentNode> {
    let dept = pending.remove(&id)?;
    let mut node = DepartmentNode::from(dept);

    if let Some(child_ids) = children_of.get(&id) {
        node.children = child_ids
            .iter()
            .filter_map(|child_id| materialize(*child_id, pending, children_of))
            .collect();
    }

    Some(node)
}

/// 読み込み済みの一覧から、指定部門の全子孫IDを求める（自身は含まない）
pub fn descendants_of(all: &[department_model::Model], department_id: i32) -> HashSet<i32> {
    let children_of = group_children(all);
    let mut descendants = HashSet::new();
    let mut queue = VecDeque::from([department_id]);

    while let Some(current) = queue.pop_front() {
        for child_id in children_of.get(&current).into_iter().flatten() {
            if *child_id != department_id && descendants.insert(*child_id) {
                queue.push_back(*child_id);
            }
        }
    }

    descendants
}

/// `parent_id` を `department_id` の親にすると閉路ができるか
pub fn would_create_cycle(
    descendants: &HashSet<i32>,
    department_id: i32,
    parent_id: i32,
) -> bool {
    parent_id == department_id || descendants.contains(&parent_id)
}
