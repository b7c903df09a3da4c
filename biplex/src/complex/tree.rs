use itertools::Itertools;
use log::{debug, trace};

use crate::error::BiplexError;
use crate::grade::Grade;

use super::node::{NodeId, SimplexNode};
use super::views::DimViews;

pub(crate) const ROOT: NodeId = NodeId(0);

// rooted simplex tree over an arena of nodes: a depth-k node represents the
// (k-1)-simplex spelled by the vertex labels on its root path.
pub struct SimplexTree {
    pub(crate) nodes: Vec<SimplexNode>,
    pub(crate) hom_dim: isize,
    pub(crate) x_grades: usize,
    pub(crate) y_grades: usize,
    pub(crate) views: DimViews,
}

impl SimplexTree {
    pub fn new(hom_dim: isize) -> Self {
        assert!(hom_dim >= 0);
        Self {
            nodes: vec![SimplexNode::root()],
            hom_dim,
            x_grades: 0,
            y_grades: 0,
            views: DimViews::default(),
        }
    }

    pub fn hom_dim(&self) -> isize {
        self.hom_dim
    }

    pub fn num_x_grades(&self) -> usize {
        self.x_grades
    }

    pub fn num_y_grades(&self) -> usize {
        self.y_grades
    }

    pub fn node(&self, id: NodeId) -> &SimplexNode {
        &self.nodes[id.0]
    }

    // declares the discrete grade grid; once set, insertions validate their
    // grades against it. The Rips builder and update_xy_indexes set it
    // themselves.
    pub fn set_grade_bounds(&mut self, num_x: usize, num_y: usize) {
        self.x_grades = num_x;
        self.y_grades = num_y;
    }

    fn child_by_vertex(&self, id: NodeId, vertex: usize) -> Option<NodeId> {
        let kids = &self.nodes[id.0].children;
        kids.binary_search_by_key(&vertex, |&c| self.nodes[c.0].vertex)
            .ok()
            .map(|i| kids[i])
    }

    // idempotent: an existing child with this vertex is returned untouched,
    // in particular its grade list is not extended.
    fn add_child(&mut self, parent: NodeId, vertex: usize, grades: &[Grade]) -> NodeId {
        let pos = {
            let kids = &self.nodes[parent.0].children;
            match kids.binary_search_by_key(&vertex, |&c| self.nodes[c.0].vertex) {
                Ok(i) => return kids[i],
                Err(i) => i,
            }
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(SimplexNode::new(vertex, parent, grades.to_vec()));
        self.nodes[parent.0].children.insert(pos, id);
        id
    }

    fn check_grade(&self, grade: Grade) -> Result<(), BiplexError> {
        if grade.x < self.x_grades && grade.y < self.y_grades {
            Ok(())
        } else {
            Err(BiplexError::BadGrade {
                grade,
                num_x: self.x_grades,
                num_y: self.y_grades,
            })
        }
    }

    // inserts the simplex together with all of its faces; nodes that already
    // exist are kept as they are. Global and dimension indexes are NOT
    // maintained here; run the update passes after a bulk load.
    pub fn add_simplex(
        &mut self,
        vertices: Vec<usize>,
        grades: Vec<Grade>,
    ) -> Result<(), BiplexError> {
        assert!(!grades.is_empty());
        if self.x_grades > 0 || self.y_grades > 0 {
            for &g in &grades {
                self.check_grade(g)?;
            }
        }
        let vertices = vertices.into_iter().sorted().dedup().collect_vec();
        self.add_faces(ROOT, &vertices, &grades);
        Ok(())
    }

    fn add_faces(&mut self, node: NodeId, vertices: &[usize], grades: &[Grade]) {
        for (i, &v) in vertices.iter().enumerate() {
            let child = self.add_child(node, v, grades);
            self.add_faces(child, &vertices[i + 1..], grades);
        }
    }

    // bulk-load regrade: each node holds an "original" x-coordinate which is
    // replaced by the grade list at grades_ind[original_x].
    pub fn update_xy_indexes(
        &mut self,
        grades_ind: &[Vec<Grade>],
        num_x: usize,
        num_y: usize,
    ) -> Result<(), BiplexError> {
        self.x_grades = num_x;
        self.y_grades = num_y;
        self.update_xy_recursive(ROOT, grades_ind)
    }

    fn update_xy_recursive(
        &mut self,
        id: NodeId,
        grades_ind: &[Vec<Grade>],
    ) -> Result<(), BiplexError> {
        let kids = self.nodes[id.0].children.clone();
        for c in kids {
            let original = self.nodes[c.0].grade();
            let grades = grades_ind.get(original.x).ok_or(BiplexError::BadGrade {
                grade: original,
                num_x: self.x_grades,
                num_y: self.y_grades,
            })?;
            assert!(!grades.is_empty());
            for &g in grades {
                self.check_grade(g)?;
            }
            self.nodes[c.0].grades = grades.clone();
            self.update_xy_recursive(c, grades_ind)?;
        }
        Ok(())
    }

    // DFS in child-vertex order; indexes are dense in creation order.
    pub fn update_global_indexes(&mut self) {
        let mut gic = 0;
        self.update_gi_recursive(ROOT, &mut gic);
        debug!("assigned {gic} global indexes");
    }

    fn update_gi_recursive(&mut self, id: NodeId, gic: &mut usize) {
        let kids = self.nodes[id.0].children.clone();
        for c in kids {
            self.nodes[c.0].global_index = Some(*gic);
            *gic += 1;
            self.update_gi_recursive(c, gic);
        }
    }

    // builds the bifiltered Vietoris-Rips complex up to dimension hom_dim+1:
    // times[i] is the discrete birth of point i, distances is the packed
    // upper triangle with d(p, j) at distances[j(j-1)/2 + p] for p < j, and
    // usize::MAX means "no edge". Assigns global indexes in-pass and then
    // computes the dimension indexes.
    pub fn build_rips_complex(
        &mut self,
        times: &[usize],
        distances: &[usize],
        num_x: usize,
        num_y: usize,
    ) -> Result<(), BiplexError> {
        let n = times.len();
        assert_eq!(distances.len(), n * n.saturating_sub(1) / 2);

        self.x_grades = num_x;
        self.y_grades = num_y;

        debug!("building bifiltered Rips complex on {n} points");

        let mut gic = 0;
        for i in 0..n {
            let grade = Grade::new(times[i], 0);
            self.check_grade(grade)?;
            let node = self.append_graded_child(ROOT, i, grade, &mut gic);

            let mut parent_indexes = vec![i];
            self.build_rips_subtree(
                times,
                distances,
                node,
                &mut parent_indexes,
                times[i],
                0,
                1,
                &mut gic,
            )?;
        }
        debug!("built {gic} simplices");

        self.update_dim_indexes();
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_rips_subtree(
        &mut self,
        times: &[usize],
        distances: &[usize],
        parent: NodeId,
        parent_indexes: &mut Vec<usize>,
        prev_time: usize,
        prev_dist: usize,
        cur_dim: isize,
        gic: &mut usize,
    ) -> Result<(), BiplexError> {
        let n = times.len();
        let last = *parent_indexes.last().unwrap();

        for j in (last + 1)..n {
            // the new simplex appears once every pairwise distance does
            let mut current_dist = prev_dist;
            for &p in parent_indexes.iter() {
                let d = distances[j * (j - 1) / 2 + p];
                if d > current_dist {
                    current_dist = d;
                }
            }
            if current_dist == usize::MAX {
                continue; // no edge
            }

            let current_time = prev_time.max(times[j]);
            let grade = Grade::new(current_time, current_dist);
            self.check_grade(grade)?;

            let node = self.append_graded_child(parent, j, grade, gic);
            trace!("simplex {parent_indexes:?}+[{j}] at {grade}");

            if cur_dim <= self.hom_dim {
                parent_indexes.push(j);
                self.build_rips_subtree(
                    times,
                    distances,
                    node,
                    parent_indexes,
                    current_time,
                    current_dist,
                    cur_dim + 1,
                    gic,
                )?;
                parent_indexes.pop();
            }
        }
        Ok(())
    }

    // children arrive in strictly increasing vertex order during the Rips
    // build, so a plain push keeps the child list sorted.
    fn append_graded_child(
        &mut self,
        parent: NodeId,
        vertex: usize,
        grade: Grade,
        gic: &mut usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = SimplexNode::new(vertex, parent, vec![grade]);
        node.global_index = Some(*gic);
        *gic += 1;
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    // binary-search descent by vertex at each level.
    pub fn find_simplex(&self, vertices: &[usize]) -> Option<NodeId> {
        if vertices.is_empty() {
            return None;
        }
        let mut node = ROOT;
        for &v in vertices {
            node = self.child_by_vertex(node, v)?;
        }
        Some(node)
    }

    // binary-search descent by global index: an exact hit ends the descent,
    // otherwise the greatest child whose index is <= the key contains the
    // key in its subtree (indexes are DFS-dense).
    pub fn find_vertices(&self, global_index: usize) -> Option<Vec<usize>> {
        let mut vertices = vec![];
        let mut node = ROOT;
        loop {
            let c = self.step_towards(node, global_index)?;
            vertices.push(self.nodes[c.0].vertex);
            if self.nodes[c.0].global_index == Some(global_index) {
                return Some(vertices);
            }
            node = c;
        }
    }

    // grades of appearance and dimension of the simplex with this index.
    pub fn simplex_data(&self, global_index: usize) -> Option<(&[Grade], isize)> {
        let mut node = ROOT;
        let mut dim = 0;
        loop {
            let c = self.step_towards(node, global_index)?;
            if self.nodes[c.0].global_index == Some(global_index) {
                return Some((&self.nodes[c.0].grades, dim));
            }
            node = c;
            dim += 1;
        }
    }

    fn step_towards(&self, node: NodeId, global_index: usize) -> Option<NodeId> {
        let kids = &self.nodes[node.0].children;
        let pos = kids.partition_point(|&c| {
            self.nodes[c.0].global_index.map_or(false, |gi| gi <= global_index)
        });
        (pos > 0).then(|| kids[pos - 1])
    }

    // global indexes of dim-simplices alive at the multigrade (time, dist).
    pub fn simplices_at(&self, time: usize, dist: usize, dim: isize) -> Vec<usize> {
        let mut found = vec![];
        if dim >= 0 {
            self.collect_at(ROOT, 0, time, dist, dim, &mut found);
        }
        found
    }

    fn collect_at(
        &self,
        id: NodeId,
        level: isize,
        time: usize,
        dist: usize,
        dim: isize,
        found: &mut Vec<usize>,
    ) {
        if level == dim + 1 {
            let node = &self.nodes[id.0];
            let g = node.grade();
            if g.x <= time && g.y <= dist {
                if let Some(gi) = node.global_index {
                    found.push(gi);
                }
            }
            return;
        }
        for &c in &self.nodes[id.0].children {
            self.collect_at(c, level + 1, time, dist, dim, found);
        }
    }

    // number of simplices of dimension hom_dim-1, hom_dim or hom_dim+1.
    pub fn dim_size(&self, dim: isize) -> Option<usize> {
        if dim == self.hom_dim - 1 {
            Some(self.views.low.len())
        } else if dim == self.hom_dim {
            Some(self.views.mid.len())
        } else if dim == self.hom_dim + 1 {
            Some(self.views.high.len())
        } else {
            None
        }
    }

    // dumps the whole tree through the trace log level, one line per node.
    pub fn trace_tree(&self) {
        if log::log_enabled!(log::Level::Trace) {
            self.trace_subtree(ROOT, 0);
        }
    }

    fn trace_subtree(&self, id: NodeId, indent: usize) {
        if id != ROOT {
            let node = &self.nodes[id.0];
            trace!(
                "{:indent$}{} {} gi={:?} di={:?}",
                "",
                node.vertex,
                node.grade(),
                node.global_index,
                node.dim_index,
            );
        }
        for &c in &self.nodes[id.0].children {
            self.trace_subtree(c, indent + 2);
        }
    }

    // the last node in DFS order carries the largest global index.
    pub fn num_simplices(&self) -> usize {
        let mut node = ROOT;
        while let Some(&last) = self.nodes[node.0].children.last() {
            node = last;
        }
        if node == ROOT {
            0
        } else {
            self.nodes[node.0].global_index.map_or(0, |gi| gi + 1)
        }
    }
}
