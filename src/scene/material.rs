use crate::math::Color;

/// Shading model of a material
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Lit by scene lights; transmission makes the surface see-through
    Physical {
        roughness: f32,
        metalness: f32,
        transmission: f32,
        clearcoat: f32,
        flat: bool,
    },
    /// Unlit solid colour
    Basic,
    /// Unlit line colour, for segment geometry
    Line,
    /// Unlit sprites of `size` world units, for point geometry
    Points { size: f32 },
}

/// Surface description uploaded to a graphics backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    /// 1.0 is fully opaque
    pub opacity: f32,
    /// Draw triangle edges instead of filled triangles
    pub wireframe: bool,
}

impl Material {
    pub fn physical(color: Color, roughness: f32, metalness: f32, transmission: f32) -> Self {
        Self {
            shading: Shading::Physical {
                roughness,
                metalness,
                transmission,
                clearcoat: 0.0,
                flat: false,
            },
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn line(color: Color) -> Self {
        Self {
            shading: Shading::Line,
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn points(color: Color, size: f32) -> Self {
        Self {
            shading: Shading::Points { size },
            color,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn with_clearcoat(mut self, value: f32) -> Self {
        if let Shading::Physical { ref mut clearcoat, .. } = self.shading {
            *clearcoat = value;
        }
        self
    }

    pub fn flat_shaded(mut self) -> Self {
        if let Shading::Physical { ref mut flat, .. } = self.shading {
            *flat = true;
        }
        self
    }

    pub fn is_lit(&self) -> bool {
        matches!(self.shading, Shading::Physical { .. })
    }

    /// Coverage used when compositing: opacity reduced by transmission
    pub fn coverage(&self) -> f32 {
        let transmission = match self.shading {
            Shading::Physical { transmission, .. } => transmission,
            _ => 0.0,
        };
        (self.opacity * (1.0 - 0.7 * transmission)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_set_fields() {
        let m = Material::basic(Color(0xf472b6)).wireframe().with_opacity(0.5);
        assert!(m.wireframe);
        assert_eq!(m.opacity, 0.5);
        assert!(!m.is_lit());
    }

    #[test]
    fn test_physical_modifiers() {
        let m = Material::physical(Color(0x22d3ee), 0.2, 0.9, 0.5).flat_shaded().with_clearcoat(1.0);
        match m.shading {
            Shading::Physical { flat, clearcoat, metalness, .. } => {
                assert!(flat);
                assert_eq!(clearcoat, 1.0);
                assert_eq!(metalness, 0.9);
            }
            other => panic!("unexpected shading {:?}", other),
        }
        assert!(m.is_lit());
    }

    #[test]
    fn test_modifiers_ignore_unlit_materials() {
        let m = Material::line(Color::WHITE).flat_shaded().with_clearcoat(1.0);
        assert_eq!(m.shading, Shading::Line);
    }

    #[test]
    fn test_coverage_accounts_for_transmission() {
        let glass = Material::physical(Color::WHITE, 0.0, 0.1, 0.95);
        let solid = Material::basic(Color::WHITE);
        assert!(glass.coverage() < 0.4);
        assert_eq!(solid.coverage(), 1.0);
        assert_eq!(solid.with_opacity(0.3).coverage(), 0.3);
    }
}
