use biplex_matrix::{IndexMatrix, MapMatrix, PermMapMatrix, SetEntry};
use log::debug;

use crate::error::BiplexError;

use super::node::NodeId;
use super::tree::SimplexTree;

// boundary of the direct sum B+C together with the merge (or split) map and
// the table of last column indexes per multi-grade.
pub struct DirectSumMatrices {
    pub boundary: MapMatrix,
    pub sum_map: MapMatrix,
    pub end_cols: IndexMatrix,
}

impl SimplexTree {
    // mod-2 boundary matrix for simplices of the given dimension, columns in
    // dimension-index order.
    pub fn boundary_mx(&self, dim: isize) -> Result<MapMatrix, BiplexError> {
        let (view, num_rows) = if dim == self.hom_dim {
            (&self.views.mid, self.views.low.len())
        } else if dim == self.hom_dim + 1 {
            (&self.views.high, self.views.mid.len())
        } else {
            return Err(BiplexError::BadDimension(dim));
        };

        let mut mat = MapMatrix::zero((num_rows, view.len()));
        for (col, &id) in view.iter().enumerate() {
            self.write_boundary_column(&mut mat, id, col, 0)?;
        }
        Ok(mat)
    }

    // boundary of the hom_dim-simplices with columns remapped through
    // coface_order; entries of None are left out. Used for vineyard-style
    // reordering.
    pub fn boundary_mx_with_cols(
        &self,
        coface_order: &[Option<usize>],
        num_cols: usize,
    ) -> Result<PermMapMatrix, BiplexError> {
        assert_eq!(coface_order.len(), self.views.mid.len());

        let mut mat = PermMapMatrix::zero((self.views.low.len(), num_cols));
        for (dim_index, &id) in self.views.mid.iter().enumerate() {
            if let Some(order_index) = coface_order[dim_index] {
                self.write_boundary_column(&mut mat, id, order_index, 0)?;
            }
        }
        Ok(mat)
    }

    // boundary of the (hom_dim+1)-simplices with rows and columns remapped.
    pub fn boundary_mx_with_rows_cols(
        &self,
        face_order: &[Option<usize>],
        num_faces: usize,
        coface_order: &[Option<usize>],
        num_cofaces: usize,
    ) -> Result<PermMapMatrix, BiplexError> {
        assert_eq!(face_order.len(), self.views.mid.len());
        assert_eq!(coface_order.len(), self.views.high.len());

        let mut mat = PermMapMatrix::zero((num_faces, num_cofaces));
        for (dim_index, &id) in self.views.high.iter().enumerate() {
            let Some(order_index) = coface_order[dim_index] else {
                continue;
            };
            let gi = self.nodes[id.0]
                .global_index
                .expect("global indexes not assigned");
            let verts = self.find_vertices(gi).expect("global index not in tree");
            for k in 0..verts.len() {
                let facet = facet_without(&verts, k);
                let fid = self
                    .find_simplex(&facet)
                    .ok_or_else(|| BiplexError::MissingFacet(facet.clone()))?;
                let fdi = self.nodes[fid.0]
                    .dim_index
                    .expect("dimension indexes not assigned");
                let row = face_order[fdi].ok_or(BiplexError::MissingFacet(facet))?;
                mat.set(row, order_index);
            }
        }
        Ok(mat)
    }

    // matrices for the merge map [B+C, D]: the boundary of two shifted
    // copies of the hom_dim chain group, the projection back onto a single
    // copy, and the per-multigrade end-column table.
    pub fn merge_mxs(&self) -> Result<DirectSumMatrices, BiplexError> {
        let num_rows = self.views.low.len();
        let num_cols = self.views.mid.len();

        let mut boundary = MapMatrix::zero((2 * num_rows, 2 * num_cols));
        let mut merge = MapMatrix::zero((num_cols, 2 * num_cols));
        let mut end_cols = IndexMatrix::new(self.y_grades + 1, self.x_grades + 1);

        let mid = &self.views.mid;
        let mut col: isize = -1;
        let (mut b, mut c) = (0, 0); // counters within each copy
        let (mut it_b, mut it_c) = (0, 0); // cursors into mid

        for y in 0..=self.y_grades {
            for x in 0..=self.x_grades {
                // the B copy enters at (x+1, y), the C copy at (x, y+1)
                while it_b < mid.len() && {
                    let g = self.nodes[mid[it_b].0].grade();
                    g.x + 1 == x && g.y == y
                } {
                    col += 1;
                    self.write_boundary_column(&mut boundary, mid[it_b], col as usize, 0)?;
                    merge.set(b, col as usize);
                    b += 1;
                    it_b += 1;
                }
                while it_c < mid.len() && {
                    let g = self.nodes[mid[it_c].0].grade();
                    g.x == x && g.y + 1 == y
                } {
                    col += 1;
                    self.write_boundary_column(&mut boundary, mid[it_c], col as usize, num_rows)?;
                    merge.set(c, col as usize);
                    c += 1;
                    it_c += 1;
                }
                end_cols.set(y, x, col);
            }
        }

        debug!("merge matrices: boundary {:?}", boundary.shape());
        Ok(DirectSumMatrices {
            boundary,
            sum_map: merge,
            end_cols,
        })
    }

    // matrices for the split map [A, B+C] over the (hom_dim+1)-simplices.
    pub fn split_mxs(&self) -> Result<DirectSumMatrices, BiplexError> {
        let num_rows = self.views.mid.len();
        let num_cols = self.views.high.len();

        let mut boundary = MapMatrix::zero((2 * num_rows, 2 * num_cols));
        let mut end_cols = IndexMatrix::new(self.y_grades + 1, self.x_grades + 1);

        let high = &self.views.high;
        let mut col: isize = -1;
        let (mut it_b, mut it_c) = (0, 0);

        for y in 0..=self.y_grades {
            for x in 0..=self.x_grades {
                while it_b < high.len() && {
                    let g = self.nodes[high[it_b].0].grade();
                    g.x + 1 == x && g.y == y
                } {
                    col += 1;
                    self.write_boundary_column(&mut boundary, high[it_b], col as usize, 0)?;
                    it_b += 1;
                }
                while it_c < high.len() && {
                    let g = self.nodes[high[it_c].0].grade();
                    g.x == x && g.y + 1 == y
                } {
                    col += 1;
                    self.write_boundary_column(&mut boundary, high[it_c], col as usize, num_rows)?;
                    it_c += 1;
                }
                end_cols.set(y, x, col);
            }
        }

        let mut split = MapMatrix::zero((2 * num_rows, num_rows));
        for i in 0..num_rows {
            split.set(i, i);
            split.set(i + num_rows, i);
        }

        debug!("split matrices: boundary {:?}", boundary.shape());
        Ok(DirectSumMatrices {
            boundary,
            sum_map: split,
            end_cols,
        })
    }

    // end-column table: cell (y, x) holds the greatest column whose simplex
    // has multi-grade <= (x, y) in the view's order, or -1 if none.
    pub fn index_mx(&self, dim: isize) -> Result<IndexMatrix, BiplexError> {
        self.end_col_mx(dim, 0)
    }

    // same table with every grade shifted by (+1, +1), for matrices whose
    // column axis is offset by one.
    pub fn offset_index_mx(&self, dim: isize) -> Result<IndexMatrix, BiplexError> {
        self.end_col_mx(dim, 1)
    }

    fn end_col_mx(&self, dim: isize, shift: usize) -> Result<IndexMatrix, BiplexError> {
        let view = if dim == self.hom_dim {
            &self.views.mid
        } else if dim == self.hom_dim + 1 {
            &self.views.high
        } else {
            return Err(BiplexError::BadDimension(dim));
        };

        let x_size = self.x_grades + shift;
        let y_size = self.y_grades + shift;
        let mut mat = IndexMatrix::new(y_size, x_size);
        if view.is_empty() || x_size == 0 || y_size == 0 {
            return Ok(mat); // every cell stays -1
        }

        let mut cur_entry = 0;
        let mut col: isize = 0;
        for &id in view {
            let g = self.nodes[id.0].grade();
            let (cx, cy) = (g.x + shift, g.y + shift);
            // cells skipped since the previous simplex keep the last column
            while cur_entry < cx + cy * x_size {
                mat.set(cur_entry / x_size, cur_entry % x_size, col - 1);
                cur_entry += 1;
            }
            mat.set(cy, cx, col);
            col += 1;
        }
        while cur_entry < x_size * y_size {
            mat.set(cur_entry / x_size, cur_entry % x_size, col - 1);
            cur_entry += 1;
        }
        Ok(mat)
    }

    // writes the facet rows of the simplex into the given column; offset
    // shifts rows for the block layout of the direct-sum matrices.
    fn write_boundary_column<M: SetEntry>(
        &self,
        mat: &mut M,
        id: NodeId,
        col: usize,
        offset: usize,
    ) -> Result<(), BiplexError> {
        let gi = self.nodes[id.0]
            .global_index
            .expect("global indexes not assigned");
        let verts = self.find_vertices(gi).expect("global index not in tree");
        if verts.len() == 1 {
            return Ok(()); // a vertex has empty boundary
        }

        for k in 0..verts.len() {
            let facet = facet_without(&verts, k);
            let fid = self
                .find_simplex(&facet)
                .ok_or(BiplexError::MissingFacet(facet))?;
            let fdi = self.nodes[fid.0]
                .dim_index
                .expect("dimension indexes not assigned");
            mat.set(fdi + offset, col);
        }
        Ok(())
    }
}

fn facet_without(verts: &[usize], k: usize) -> Vec<usize> {
    let mut facet = Vec::with_capacity(verts.len() - 1);
    facet.extend_from_slice(&verts[..k]);
    facet.extend_from_slice(&verts[k + 1..]);
    facet
}
