//! Recursive Whitted-style caster: nearest hit, mirror blend, binary shadows.
//!
//! Every secondary ray (reflection or occlusion probe) ignores the shape it
//! leaves from, and reflections also ignore every shape already hit on their
//! path. The candidate set therefore shrinks by one per bounce, which bounds
//! the recursion by the number of shapes without any depth limit.

use crate::{
    algebra::{Color, Vec3},
    light::Light,
    object::{Hit, Object},
};

/// Shapes removed from consideration along the current recursion path.
/// Lives on the stack of the recursive calls, one link per bounce.
#[derive(Clone, Copy)]
struct Excluded<'a> {
    index: usize,
    parent: Option<&'a Excluded<'a>>,
}

impl Excluded<'_> {
    fn contains(mut link: Option<&Self>, index: usize) -> bool {
        while let Some(l) = link {
            if l.index == index {
                return true;
            }
            link = l.parent;
        }
        false
    }
}

/// Color seen along the ray `origin + t·direction`. `direction` must be unit length.
pub fn cast(
    objs: &[Object],
    lights: &[Light],
    origin: Vec3,
    direction: Vec3,
    color_on_miss: Color,
    color_on_full_shade: Color,
) -> Color {
    cast_excluding(objs, lights, None, origin, direction, color_on_miss, color_on_full_shade, 0)
}

#[allow(clippy::too_many_arguments)]
fn cast_excluding(
    objs: &[Object],
    lights: &[Light],
    excluded: Option<&Excluded>,
    origin: Vec3,
    direction: Vec3,
    color_on_miss: Color,
    color_on_full_shade: Color,
    depth: usize,
) -> Color {
    debug_assert!(depth <= objs.len(), "recursion deeper than shape count");

    let (index, hit) = match intersect_closest(origin, direction, objs, excluded) {
        Some(v) => v,
        None => return color_on_miss,
    };
    let material = objs[index].material();
    let excluded = Excluded { index, parent: excluded };

    let mut color_self = material.color;
    if material.is_mirror() {
        let mirrored = cast_excluding(
            objs,
            lights,
            Some(&excluded),
            hit.point,
            hit.reflection,
            color_on_miss,
            color_on_full_shade,
            depth + 1,
        );
        color_self = material.blend(mirrored);
    }

    color_self.mul(light_mask(objs, lights, &excluded, &hit, color_on_full_shade))
}

/// Sum of unblocked light reaching `hit`, on top of the ambient floor.
fn light_mask(
    objs: &[Object],
    lights: &[Light],
    excluded: &Excluded,
    hit: &Hit,
    color_on_full_shade: Color,
) -> Color {
    let mut mask = color_on_full_shade;
    for light in lights {
        let incidence = light.incidence(hit.point);
        let blocked = objs
            .iter()
            .enumerate()
            .filter(|(i, _)| !Excluded::contains(Some(excluded), *i))
            .any(|(_, o)| o.hit(hit.point, incidence).is_some());
        if blocked {
            continue;
        }

        let power = light.falloff(incidence, hit.normal);
        if power <= 0.0 {
            continue;
        }
        mask += light.color().scale(power);
    }
    mask
}

/// Nearest hit by squared distance from `ro`; the first of equal hits wins.
fn intersect_closest(
    ro: Vec3,
    rd: Vec3,
    objs: &[Object],
    excluded: Option<&Excluded>,
) -> Option<(usize, Hit)> {
    let mut best: Option<(usize, Hit)> = None;
    let mut shortest = f32::MAX;
    for (i, o) in objs.iter().enumerate() {
        if Excluded::contains(excluded, i) {
            continue;
        }
        let Some(hit) = o.hit(ro, rd) else { continue };
        let dist2 = hit.point.sub(ro).length_squared();
        if dist2 < shortest {
            shortest = dist2;
            best = Some((i, hit));
        }
    }
    best
}
