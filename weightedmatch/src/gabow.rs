/* ************************************************************************* *
 *                                                                           *
 *        Copyright (c) 2004 Peter Cappello  <cappello@cs.ucsb.edu>          *
 *        Copyright (c) 2019 Jilles Tjoelker <jilles@stack.nl>               *
 *                                                                           *
 *    Permission is hereby granted, free of charge, to any person obtaining  *
 *  a copy of this software and associated documentation files (the          *
 *  "Software"), to deal in the Software without restriction, including      *
 *  without limitation the rights to use, copy, modify, merge, publish,      *
 *  distribute, sublicense, and/or sell copies of the Software, and to       *
 *  permit persons to whom the Software is furnished to do so, subject to    *
 *  the following conditions:                                                *
 *                                                                           *
 *    The above copyright notice and this permission notice shall be         *
 *  included in all copies or substantial portions of the Software.          *
 *                                                                           *
 *    THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,        *
 *  EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF       *
 *  MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.   *
 *  IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY     *
 *  CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,     *
 *  TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE        *
 *  SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.                   *
 *                                                                           *
 * ************************************************************************* */

//! Gabow's O(n^3) implementation of Edmonds' weighted matching algorithm,
//! following the step labels (W1, PA3, SC4, ...) of appendix D of his 1973
//! dissertation and Rothberg's C coding of it, set up to find a matching of
//! maximum size and, among those, minimum cost on a sparse candidate graph.
//!
//! Vertices are numbered 1..=n and vertex n + 1 is a sentinel. Every
//! candidate edge becomes two opposite arcs numbered after the vertices, and
//! the slot after the last arc is a sentinel arc. Costs are doubled so every
//! dual value stays integral.

use std::mem;

use tracing::trace;

use crate::Weight;

type ArcId = usize;
type Vertex = usize;
/// An arc, negated while the vertex it belongs to is unlinked.
type Link = isize;

/// Value of `mate[v]` in the result when `v` is single.
pub(crate) const UNMATCHED: Vertex = 0;

/// Candidate edges stored as pairs of opposite arcs.
///
/// `next` is shared: `next[v]` heads the arc list of vertex `v` and
/// `next[arc]` is the arc after `arc` in its list; 0 ends a list.
struct Arcs {
    vertices: usize,
    next: Vec<ArcId>,
    head: Vec<Vertex>,
    weight: Vec<Weight>,
}

impl Arcs {
    /// Stores every edge `(u, v, cost)` with weight `bonus - 2 * (cost - c0)`,
    /// where `c0` is the cheapest cost and `bonus` exceeds the doubled sum of
    /// all `cost - c0`. A matching with more edges then always weighs more,
    /// and of two matchings of equal size the cheaper one weighs more.
    ///
    /// Returns the arcs and `bonus`, or `None` if the weights would not fit.
    fn new(vertices: usize, edges: &[(Vertex, Vertex, Weight)]) -> Option<(Self, Weight)> {
        let cheapest = edges.iter().map(|&(_, _, cost)| cost).min().unwrap_or(0);
        let mut bonus: Weight = 2;
        for &(_, _, cost) in edges {
            bonus = bonus.checked_add(cost.checked_sub(cheapest)?.checked_mul(2)?)?;
        }
        // Dual values and slacks stay within a small multiple of the bonus.
        if bonus > Weight::MAX / 8 {
            return None;
        }

        let size = vertices + 2 * edges.len() + 2;
        let mut arcs = Arcs {
            vertices,
            next: vec![0; size],
            head: vec![0; size],
            weight: vec![0; size],
        };
        let mut arc = vertices + 1;
        for &(u, v, cost) in edges {
            let weight = bonus - 2 * (cost - cheapest);
            // arc + 1 leaves u towards v; arc leaves v towards u.
            arcs.weight[arc] = weight;
            arcs.weight[arc + 1] = weight;
            arcs.head[arc] = u;
            arcs.head[arc + 1] = v;
            arcs.next[arc + 1] = arcs.next[u];
            arcs.next[u] = arc + 1;
            arcs.next[arc] = arcs.next[v];
            arcs.next[v] = arc;
            arc += 2;
        }
        Some((arcs, bonus))
    }
}

/// Search state. Vertex arrays have room for the sentinel vertex, arc arrays
/// for the sentinel arc.
pub(crate) struct MinCostMatch {
    arcs: Arcs,
    nil_vertex: Vertex,
    nil_arc: ArcId,

    mate: Vec<ArcId>,
    base: Vec<Vertex>,
    last_edge: [Link; 3], // set by unlink for unpair and unpair_all
    last_vertex: Vec<Vertex>,
    link: Vec<Link>,
    next_delta: Vec<Weight>,
    next_edge: Vec<ArcId>,
    next_pair: Vec<ArcId>,
    next_vertex: Vec<Vertex>,
    dual: Vec<Weight>,

    delta: Weight,
    last_delta: Weight,
    new_base: Vertex,
    next_base: Vertex,
    stop_scan: Vertex,
    pair_point: ArcId,
    neighbor: Vertex,
    new_last: Vertex,
    next_point: ArcId,
    old_first: Vertex,
    second_mate: Vertex,
    f: Link,
    nxt_edge: Link,
    next_e: Link,
    next_u: Vertex,

    e: Link,
    v: Vertex,
    i: usize,
}

impl MinCostMatch {
    /// Prepares a search over `vertices` vertices and the 1-based candidate
    /// `edges`, at least one of them. `None` if the costs are too large.
    pub(crate) fn new(vertices: usize, edges: &[(Vertex, Vertex, Weight)]) -> Option<Self> {
        // W0. Input.
        let (mut arcs, bonus) = Arcs::new(vertices, edges)?;
        let nil_vertex = vertices + 1;
        let nil_arc = vertices + 2 * edges.len() + 1;
        arcs.head[nil_arc] = nil_vertex;

        // W1. Initialize.
        let last_delta = bonus / 2;
        trace!(vertices, edges = edges.len(), last_delta, "W1");

        let size = vertices + 2;
        let mut search = MinCostMatch {
            arcs,
            nil_vertex,
            nil_arc,
            mate: vec![0; size],
            base: vec![0; size],
            last_edge: [0; 3],
            last_vertex: vec![0; size],
            link: vec![0; size],
            next_delta: vec![0; size],
            next_edge: vec![0; size],
            next_pair: vec![0; nil_arc + 1],
            next_vertex: vec![0; size],
            dual: vec![0; size],
            delta: 0,
            last_delta,
            new_base: 0,
            next_base: 0,
            stop_scan: 0,
            pair_point: 0,
            neighbor: 0,
            new_last: 0,
            next_point: 0,
            old_first: 0,
            second_mate: 0,
            f: 0,
            nxt_edge: 0,
            next_e: 0,
            next_u: 0,
            e: 0,
            v: 0,
            i: vertices + 2,
        };
        for i in 1..=nil_vertex {
            search.mate[i] = nil_arc;
            search.next_edge[i] = nil_arc;
            search.link[i] = -(nil_arc as Link);
            search.base[i] = i;
            search.last_vertex[i] = i;
            search.dual[i] = last_delta;
            search.next_delta[i] = last_delta;
        }
        Some(search)
    }

    /// Runs the search and returns `mate`, indexed 1..=n, where `mate[i]` is
    /// the vertex matched to `i` or [`UNMATCHED`]. Index 0 is unused.
    pub(crate) fn solve(mut self) -> Vec<Vertex> {
        let vertices = self.arcs.vertices;
        let mut augmentations = 0usize;
        loop {
            // W2. Start a new search.
            self.delta = 0;
            for v in 1..=vertices {
                self.v = v;
                if self.mate[v] == self.nil_arc {
                    // Link all exposed vertices.
                    self.pointer(self.nil_vertex, v, self.nil_arc as Link);
                }
            }
            self.v = vertices + 1;

            // W3. Get next edge.
            loop {
                self.i = 1;
                for j in 2..=vertices {
                    // Dissertation p. 213 has next_delta[i] < next_delta[j].
                    if self.next_delta[self.i] > self.next_delta[j] {
                        self.i = j;
                    }
                }

                // delta is the minimum slack in the next edge.
                self.delta = self.next_delta[self.i];
                trace!(i = self.i, delta = self.delta, "W3");

                if self.delta == self.last_delta {
                    // W8. Undo blossoms.
                    self.set_bounds();
                    self.unpair_all();
                    for i in 1..=vertices {
                        let partner = self.arcs.head[self.mate[i]];
                        self.mate[i] = if partner == self.nil_vertex {
                            UNMATCHED
                        } else {
                            partner
                        };
                    }
                    self.mate.truncate(vertices + 1);
                    trace!(augmentations, "search finished");

                    // W9.
                    return self.mate;
                }

                // W4. Assign pair links.
                self.v = self.base[self.i];

                if self.link[self.v] >= 0 {
                    if self.pair() {
                        break;
                    }
                } else {
                    // W5. Assign pointer link.
                    let w = self.bmate(self.v); // blossom w is matched with blossom v.
                    if self.link[w] < 0 {
                        // w is unlinked.
                        self.pointer(self.v, w, self.opp_edge(self.next_edge[self.i] as Link));
                    } else {
                        // W6. Undo a pair link.
                        trace!(v = self.v, w, "W6 unpair");
                        self.unpair(self.v, w);
                    }
                }
            }

            // W7. Enlarge the matching.
            augmentations += 1;
            self.last_delta -= self.delta;
            self.set_bounds();
            let g = self.opp_edge(self.e);
            self.rematch(self.bend(self.e as usize), g);
            self.rematch(self.bend(g as usize), self.e);
        }
    }

    fn bend(&self, e: ArcId) -> Vertex {
        self.base[self.arcs.head[e]]
    }

    fn blink(&self, v: Vertex) -> Vertex {
        self.base[self.arcs.head[self.link[v] as usize]]
    }

    fn bmate(&self, v: Vertex) -> Vertex {
        self.base[self.arcs.head[self.mate[v]]]
    }

    fn opp_edge(&self, e: Link) -> Link {
        if (e - self.arcs.vertices as Link) % 2 == 0 {
            e - 1
        } else {
            e + 1
        }
    }

    fn slack(&self, e: ArcId) -> Weight {
        let opposite = self.opp_edge(e as Link) as ArcId;
        self.dual[self.arcs.head[e]] + self.dual[self.arcs.head[opposite]] - self.arcs.weight[e]
    }

    /// Updates a blossom's pair list, possibly inserting edge `e`. Expects
    /// `neighbor` to be the end vertex of `e` and `pair_point` to point at the
    /// next pair to examine.
    fn insert_pair(&mut self) {
        // IP1. Prepare to insert.
        let delta_e = self.slack(self.e as ArcId) / 2;

        self.next_point = self.next_pair[self.pair_point];

        // IP2. Find insertion point.
        while self.arcs.head[self.next_point] < self.neighbor {
            self.pair_point = self.next_point;
            self.next_point = self.next_pair[self.next_point];
        }

        if self.arcs.head[self.next_point] == self.neighbor {
            // IP3. Choose the edge. The comparison is reversed in the
            // dissertation (p. 220).
            if delta_e >= self.slack(self.next_point) / 2 {
                return;
            }
            self.next_point = self.next_pair[self.next_point];
        }

        // IP4.
        self.next_pair[self.pair_point] = self.e as usize;
        self.pair_point = self.e as usize;
        self.next_pair[self.e as usize] = self.next_point;

        // IP5. Update best linking edge.
        if self.next_delta[self.new_base] > delta_e {
            self.next_delta[self.new_base] = delta_e;
        }
    }

    /// Links the unlinked vertices in the path from `end[e]` to `new_base`;
    /// `new_last` is the current last vertex of `new_base`'s blossom.
    fn link_path(&mut self, mut e: ArcId) {
        // L1. Done?
        self.v = self.bend(e);
        while self.v != self.new_base {
            // L2. Link next vertex.
            let u = self.bmate(self.v);
            self.link[u] = self.opp_edge(e as Link);

            // L3. Add vertices to blossom list.
            self.next_vertex[self.new_last] = self.v;
            self.next_vertex[self.last_vertex[self.v]] = u;
            self.new_last = self.last_vertex[u];
            let mut i = self.v;

            // L4. Update base.
            loop {
                self.base[i] = self.new_base;
                i = self.next_vertex[i];
                if i == self.nil_vertex {
                    break;
                }
            }

            // L5. Get next edge.
            e = self.link[self.v] as ArcId;
            self.v = self.bend(e);
        }
    }

    /// Merges the pair list of the subblossom based at `v` into the pair list
    /// of the new blossom.
    fn merge_pairs(&mut self, v: Vertex) {
        // MP1. Prepare to merge.
        self.next_delta[v] = self.last_delta;

        self.pair_point = self.nil_arc;
        self.f = self.next_edge[v] as Link;
        while self.f != self.nil_arc as Link {
            // MP2. Prepare to insert.
            self.e = self.f;
            self.neighbor = self.arcs.head[self.e as usize];
            self.f = self.next_pair[self.f as usize] as Link;

            // MP3. Insert edge.
            if self.base[self.neighbor] != self.new_base {
                self.insert_pair();
            }
        }
    }

    /// Processes an edge joining two linked vertices; `v` is the base of one
    /// end. Returns true iff the edge completes an augmenting path.
    fn pair(&mut self) -> bool {
        let mut u;
        let mut w;

        // PA1. Prepare to find edge.
        self.e = self.next_edge[self.v] as Link;

        // PA2. Find edge.
        while self.slack(self.e as usize) != 2 * self.delta {
            self.e = self.next_pair[self.e as usize] as Link;
        }

        // PA3. Begin flagging vertices.
        w = self.bend(self.e as usize);
        let bmate_w = self.bmate(w);
        self.link[bmate_w] = -self.e;

        u = self.bmate(self.v);

        // PA4. Flag vertices.
        while self.link[u] != -self.e {
            self.link[u] = -self.e;

            if self.mate[w] != self.nil_arc {
                mem::swap(&mut self.v, &mut w);
            }
            self.v = self.blink(self.v);
            u = self.bmate(self.v);
        }

        // PA5. Augmenting path?
        if u == self.nil_vertex && self.v != w {
            return true;
        }

        // PA6. Prepare to link vertices.
        self.new_last = self.v;
        self.new_base = self.v;
        self.old_first = self.next_vertex[self.v];

        // PA7. Link vertices.
        self.link_path(self.e as usize);
        self.link_path(self.opp_edge(self.e) as usize);

        // PA8. Finish linking.
        self.next_vertex[self.new_last] = self.old_first;
        if self.last_vertex[self.new_base] == self.new_base {
            self.last_vertex[self.new_base] = self.new_last;
        }
        trace!(new_base = self.new_base, "PA8 blossom formed");

        // PA9. Start new pair list.
        self.next_pair[self.nil_arc] = self.nil_arc;
        self.merge_pairs(self.new_base);
        self.i = self.next_vertex[self.new_base];
        loop {
            // PA10. Merge subblossom's pair list.
            self.merge_pairs(self.i);
            self.i = self.next_vertex[self.last_vertex[self.i]];

            // PA11. Scan subblossom.
            self.scan(self.i, 2 * self.delta - self.slack(self.mate[self.i]));
            self.i = self.next_vertex[self.last_vertex[self.i]];

            // PA12. More blossoms?
            if self.i == self.old_first {
                break;
            }
        }

        false
    }

    /// Assigns a pointer link. `u` and `v` are bases of blossoms matched with
    /// each other; edge `e` joins a vertex in blossom `u` to a linked vertex.
    fn pointer(&mut self, u: usize, v: Vertex, e: Link) {
        // PT1. Reinitialize values that may have changed.
        self.link[u] = -(self.nil_arc as Link);
        self.next_vertex[self.last_vertex[u]] = self.nil_vertex;
        self.next_vertex[self.last_vertex[v]] = self.nil_vertex;

        // PT2. Find unpairing value.
        let del = if self.last_vertex[u] != u {
            // u's blossom contains other vertices
            let i = self.mate[self.next_vertex[u]];
            -self.slack(i) / 2
        } else {
            self.last_delta
        };

        // PT3.
        let mut i = u;
        while i != self.nil_vertex {
            self.dual[i] += del;
            self.next_delta[i] += del;
            i = self.next_vertex[i];
        }

        // PT4. Link v & scan. The link must be set before scan reads it.
        if self.link[v] < 0 {
            self.link[v] = e;
            self.next_pair[self.nil_arc] = self.nil_arc;
            self.scan(v, self.delta);
        } else {
            self.link[v] = e;
        }
    }

    /// Changes the matching along an alternating path starting at
    /// `first_mate`, whose new matched edge is `e`.
    fn rematch(&mut self, mut first_mate: Vertex, mut e: Link) {
        // R1. Start rematching.
        self.mate[first_mate] = e as usize;
        self.next_e = -self.link[first_mate];

        // R2. Done?
        while self.next_e != self.nil_arc as Link {
            // R3. Get next edge.
            e = self.next_e;
            self.f = self.opp_edge(e);
            first_mate = self.bend(e as usize);
            self.second_mate = self.bend(self.f as usize);
            self.next_e = -self.link[first_mate];

            // R4. Relink and rematch.
            self.link[first_mate] = -(self.mate[self.second_mate] as Link);
            self.link[self.second_mate] = -(self.mate[first_mate] as Link);

            self.mate[first_mate] = self.f as usize;
            self.mate[self.second_mate] = e as usize;
        }
    }

    /// Scans the linked blossom based at `x`, raising y by `del`. Expects
    /// `next_pair[nil_arc]` to head the pair list of `base[x]`.
    fn scan(&mut self, mut x: usize, del: Weight) {
        // SC1. Initialize.
        self.new_base = self.base[x];
        self.stop_scan = self.next_vertex[self.last_vertex[x]];
        while x != self.stop_scan {
            // SC2. Set bounds & initialize for x.
            self.dual[x] += del;
            self.next_delta[x] = self.last_delta;

            self.pair_point = self.nil_arc;
            self.e = self.arcs.next[x] as Link;
            while self.e != 0 {
                // SC3. Find a neighbor.
                self.neighbor = self.arcs.head[self.e as usize];
                let u = self.base[self.neighbor];

                // SC4. Pair link edge.
                if self.link[u] < 0 {
                    if self.link[self.bmate(u)] < 0 || self.last_vertex[u] != u {
                        let del_e = self.slack(self.e as usize);
                        if self.next_delta[self.neighbor] > del_e {
                            self.next_delta[self.neighbor] = del_e;
                            self.next_edge[self.neighbor] = self.e as usize;
                        }
                    }
                } else if u != self.new_base {
                    // SC5.
                    self.insert_pair();
                }

                // SC6.
                self.e = self.arcs.next[self.e as usize] as Link;
            }

            // SC7.
            x = self.next_vertex[x];
        }

        // SC8.
        self.next_edge[self.new_base] = self.next_pair[self.nil_arc];
    }

    /// Updates numerical bounds for linking paths; `last_delta` bounds delta
    /// for the next search.
    fn set_bounds(&mut self) {
        // SB1. Examine each vertex.
        for v1 in 1..=self.arcs.vertices {
            self.v = v1;
            // SB2. Is vertex a linked base?
            if self.link[self.v] < 0 || self.base[self.v] != self.v {
                // SB8. Update next_delta.
                self.next_delta[self.v] = self.last_delta;
                continue;
            }

            // SB3. Begin processing linked blossom.
            self.link[self.v] = -self.link[self.v];
            self.i = self.v;

            // SB4. Update y in linked blossom. Rothberg's while, not the
            // dissertation's do-while.
            while self.i != self.nil_vertex {
                self.dual[self.i] -= self.delta;
                self.i = self.next_vertex[self.i];
            }

            // SB5. Is linked blossom matched?
            self.f = self.mate[self.v] as Link;
            if self.f != self.nil_arc as Link {
                // SB6. Begin processing unlinked blossom.
                self.i = self.bend(self.f as usize);
                let del = self.slack(self.f as usize);

                // SB7. Update y in unlinked blossom.
                while self.i != self.nil_vertex {
                    self.dual[self.i] -= del;
                    self.i = self.next_vertex[self.i];
                }
            }
            self.next_delta[self.v] = self.last_delta;
        }
        self.v = self.arcs.vertices + 1;
    }


    /// Unlinks the subblossoms of the blossom based at `old_base`, keeping
    /// the undone links for rematch and unpair and setting `last_edge`.
    fn unlink(&mut self, old_base: usize) {
        // UL1. Prepare to unlink paths.
        self.i = self.next_vertex[old_base];
        self.new_base = self.next_vertex[old_base];
        self.next_base = self.next_vertex[self.last_vertex[self.new_base]];
        self.e = self.link[self.next_base];

        // Once for each of the two paths containing the subblossom.
        for j in 1..=2 {
            loop {
                // UL2. Get next path edge.
                self.nxt_edge = self.opp_edge(self.link[self.new_base]);

                for _ in 1..=2 {
                    // UL3. Unlink blossom base.
                    self.link[self.new_base] = -self.link[self.new_base];

                    // UL4. Update base array.
                    loop {
                        self.base[self.i] = self.new_base;
                        self.i = self.next_vertex[self.i];
                        if self.i == self.next_base {
                            break;
                        }
                    }

                    // UL5. Get next vertex.
                    self.new_base = self.next_base;
                    self.next_base = self.next_vertex[self.last_vertex[self.new_base]];
                }

                // UL6. More vertices?
                if self.link[self.next_base] != self.nxt_edge {
                    break;
                }
            }

            // UL7. End of path.
            if j == 1 {
                self.last_edge[1] = self.nxt_edge;
                self.nxt_edge = self.opp_edge(self.e);
                if self.link[self.next_base] == self.nxt_edge {
                    continue;
                }
            }
            break;
        }
        self.last_edge[2] = self.nxt_edge;

        // UL8. Update blossom list.
        if self.base[self.last_vertex[old_base]] == old_base {
            self.next_vertex[old_base] = self.new_base;
        } else {
            self.next_vertex[old_base] = self.nil_vertex;
            self.last_vertex[old_base] = old_base;
        }
    }

    /// Undoes the blossom based at the unlinked vertex `old_base`, matched to
    /// the linked blossom based at `old_mate`.
    fn unpair(&mut self, old_base: usize, old_mate: Vertex) {
        // UP1. Unlink vertices.
        self.unlink(old_base);

        // UP2. Rematch a path.
        let newbase = self.bmate(old_mate);
        if newbase != old_base {
            self.link[old_base] = -(self.nil_arc as Link);
            self.rematch(newbase, self.mate[old_base] as Link);
            self.link[self.second_mate] = if self.f == self.last_edge[1] {
                -self.last_edge[2]
            } else {
                -self.last_edge[1]
            };
        }

        // UP3. Examine the linking edge.
        let mut e = self.link[old_mate];
        let mut u = self.bend(self.opp_edge(e) as usize);
        if u == newbase {
            // UP7. Relink old_mate.
            self.pointer(newbase, old_mate, e);
            return;
        }
        let bmate_u = self.bmate(u);
        self.link[bmate_u] = -e;
        // UP4 is missing from the dissertation.
        loop {
            // UP5. Relink a vertex.
            e = -self.link[u];
            self.v = self.bmate(u);
            self.pointer(u, self.v, -self.link[self.v]);

            // UP6. Get next blossom.
            u = self.bend(e as usize);
            if u == newbase {
                break;
            }
        }
        e = self.opp_edge(e);

        // UP7. Relink old_mate.
        self.pointer(newbase, old_mate, e);
    }

    /// Undoes all blossoms, rematching them into the final matching.
    fn unpair_all(&mut self) {
        // UA1. Unpair each blossom.
        for v1 in 1..=self.arcs.vertices {
            self.v = v1;
            if self.base[self.v] != self.v || self.last_vertex[self.v] == self.v {
                continue;
            }

            // UA2. Prepare to unpair.
            self.next_u = self.v;
            self.next_vertex[self.last_vertex[self.next_u]] = self.nil_vertex;

            loop {
                // UA3. Get next blossom to unpair.
                let u = self.next_u;
                self.next_u = self.next_vertex[self.next_u];

                // UA4. Unlink a blossom.
                self.unlink(u);
                if self.last_vertex[u] != u {
                    // UA5. List subblossoms to unpair.
                    self.f = if self.last_edge[2] == self.opp_edge(self.e) {
                        self.last_edge[1]
                    } else {
                        self.last_edge[2]
                    };
                    let bend_f = self.bend(self.f as usize);
                    self.next_vertex[self.last_vertex[bend_f]] = u;
                }

                // UA6. Rematch blossom.
                self.new_base = self.bmate(self.bmate(u));
                if self.new_base != self.nil_vertex && self.new_base != u {
                    self.link[u] = -(self.nil_arc as Link);
                    self.rematch(self.new_base, self.mate[u] as Link);
                }

                // UA7. Find next blossom to unpair.
                while self.last_vertex[self.next_u] == self.next_u
                    && self.next_u != self.nil_vertex
                {
                    self.next_u = self.next_vertex[self.next_u];
                }
                if self.last_vertex[self.next_u] == self.next_u && self.next_u == self.nil_vertex
                {
                    break;
                }
            }
        }
    }
}
