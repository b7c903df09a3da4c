use log::debug;

use super::node::NodeId;
use super::tree::{SimplexTree, ROOT};

// ordered views over the three tracked dimensions. They alias into the
// node arena; rebuilding the tree invalidates them.
#[derive(Debug, Default)]
pub(crate) struct DimViews {
    pub(crate) low: Vec<NodeId>,  // dim hom_dim - 1
    pub(crate) mid: Vec<NodeId>,  // dim hom_dim
    pub(crate) high: Vec<NodeId>, // dim hom_dim + 1
}

impl SimplexTree {
    // rebuilds the three dimension views, sorts each one in the
    // reverse-lexicographic multi-grade order (y, then x, then global index)
    // and assigns dense dimension indexes.
    pub fn update_dim_indexes(&mut self) {
        let mut views = DimViews::default();
        self.collect_dim_nodes(ROOT, 0, &mut views);

        for list in [&mut views.low, &mut views.mid, &mut views.high] {
            list.sort_by(|&a, &b| {
                let (na, nb) = (&self.nodes[a.0], &self.nodes[b.0]);
                na.grade()
                    .colex_cmp(nb.grade())
                    .then(na.global_index.cmp(&nb.global_index))
            });
        }
        for list in [&views.low, &views.mid, &views.high] {
            for (i, &id) in list.iter().enumerate() {
                self.nodes[id.0].dim_index = Some(i);
            }
        }

        debug!(
            "dimension views: {} low, {} mid, {} high",
            views.low.len(),
            views.mid.len(),
            views.high.len()
        );
        self.views = views;
    }

    // cur_dim is the dimension of the node's children; a depth-k node is a
    // (k-1)-simplex.
    fn collect_dim_nodes(&self, id: NodeId, cur_dim: isize, views: &mut DimViews) {
        let kids = &self.nodes[id.0].children;
        if cur_dim == self.hom_dim - 1 {
            views.low.extend(kids.iter().copied());
        } else if cur_dim == self.hom_dim {
            views.mid.extend(kids.iter().copied());
        } else if cur_dim == self.hom_dim + 1 {
            views.high.extend(kids.iter().copied());
        }
        for &c in kids {
            self.collect_dim_nodes(c, cur_dim + 1, views);
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::super::tree::tests::collinear;
    use crate::SimplexTree;

    #[test]
    fn collinear_dim_order() {
        let st = collinear();
        let dim_index_of = |verts: &[usize]| {
            let id = st.find_simplex(verts).unwrap();
            st.node(id).dim_index().unwrap()
        };

        // edges ordered by increasing distance grade
        assert_eq!(dim_index_of(&[0, 1]), 0);
        assert_eq!(dim_index_of(&[0, 2]), 1);
        assert_eq!(dim_index_of(&[1, 2]), 2);
        assert_eq!(dim_index_of(&[0, 1, 2]), 0);
    }

    #[test]
    fn ties_break_on_global_index() {
        // both vertices sit at grade (0, 0); their creation order decides.
        let mut st = SimplexTree::new(1);
        st.build_rips_complex(&[0, 0], &[usize::MAX], 1, 1).unwrap();

        assert_eq!(dim_indexes(&st, &[vec![0], vec![1]]), vec![0, 1]);
    }

    #[test]
    fn colex_order_beats_x() {
        // grades (1, 0) and (0, 1): smaller y comes first despite larger x.
        let mut st = SimplexTree::new(0);
        st.build_rips_complex(&[1, 0, 0], &[2, 1, 1], 2, 3).unwrap();

        // vertex 0 is born later on the x axis and sorts last among vertices
        assert_eq!(dim_indexes(&st, &[vec![0], vec![1], vec![2]]), vec![2, 0, 1]);
        let edges = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
        assert_eq!(dim_indexes(&st, &edges), vec![0, 1, 2]);
    }

    #[test]
    fn reindexing_is_stable() {
        let mut st = SimplexTree::new(1);
        let times = [1, 0, 2, 0];
        let distances = [3, 1, 4, 2, 2, 5];
        st.build_rips_complex(&times, &distances, 3, 6).unwrap();

        for dim in 0..=2isize {
            let size = st.dim_size(dim).unwrap();
            let mut simplices = (0..st.num_simplices())
                .filter_map(|k| {
                    let (grades, d) = st.simplex_data(k)?;
                    (d == dim).then(|| (grades[0], k))
                })
                .collect_vec();
            assert_eq!(simplices.len(), size);

            // sorting by (y, x, global index) reproduces the dim indexes
            simplices.sort_by_key(|&(g, k)| (g.y, g.x, k));
            for (expected, (_, k)) in simplices.into_iter().enumerate() {
                let verts = st.find_vertices(k).unwrap();
                let id = st.find_simplex(&verts).unwrap();
                assert_eq!(st.node(id).dim_index(), Some(expected));
            }
        }
    }

    fn dim_indexes(st: &SimplexTree, simplices: &[Vec<usize>]) -> Vec<usize> {
        simplices
            .iter()
            .map(|verts| {
                let id = st.find_simplex(verts).unwrap();
                st.node(id).dim_index().unwrap()
            })
            .collect_vec()
    }

    #[test]
    fn hom_dim_zero_has_empty_low_view() {
        let mut st = SimplexTree::new(0);
        st.build_rips_complex(&[0, 0], &[1], 1, 2).unwrap();

        assert_eq!(st.dim_size(-1), Some(0));
        assert_eq!(st.dim_size(0), Some(2));
        assert_eq!(st.dim_size(1), Some(1));
    }

    #[test]
    fn grade_helper_join_matches_view_grades() {
        let st = collinear();
        let tri = st.find_simplex(&[0, 1, 2]).unwrap();
        let e1 = st.find_simplex(&[0, 2]).unwrap();
        let e2 = st.find_simplex(&[1, 2]).unwrap();

        let join = st.node(e1).grade().join(st.node(e2).grade());
        assert_eq!(st.node(tri).grade(), join);
    }
}
