/// Helper for parsing and interpreting the OpenGL shader version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderVersion {
    Gl120,

    /// OpenGL 1.4 or later
    Gl140,

    /// e.g. OpenGL ES 2.0
    Es100,

    /// e.g. OpenGL ES 3.0
    Es300,
}

impl ShaderVersion {
    /// Parse a `GL_SHADING_LANGUAGE_VERSION` string.
    ///
    /// Returns `None` if the string contains no version number at all.
    pub fn parse(glsl_ver: &str) -> Option<Self> {
        let start = glsl_ver.find(|c| char::is_ascii_digit(&c))?;
        let es = glsl_ver[..start].contains(" ES ");
        let ver = glsl_ver[start..]
            .split_once(' ')
            .map_or(&glsl_ver[start..], |x| x.0);
        let mut numbers = ver.splitn(3, '.').map(|x| x.parse::<u8>().unwrap_or_default());
        let maj = numbers.next().unwrap_or_default();
        let min = numbers.next().unwrap_or_default();
        Some(if es {
            if maj >= 3 { Self::Es300 } else { Self::Es100 }
        } else if maj > 1 || (maj == 1 && min >= 40) {
            Self::Gl140
        } else {
            Self::Gl120
        })
    }

    /// GLSL ES, as opposed to desktop GLSL.
    pub fn is_embedded(self) -> bool {
        match self {
            Self::Gl120 | Self::Gl140 => false,
            Self::Es100 | Self::Es300 => true,
        }
    }
}

#[test]
fn test_shader_version() {
    use ShaderVersion::{Es100, Es300, Gl120, Gl140};
    for (s, v) in [
        ("1.2 OpenGL foo bar", Gl120),
        ("3.0", Gl140),
        ("0.0", Gl120),
        ("OpenGL ES GLSL ES 1.00", Es100),
        ("OpenGL ES GLSL ES 3.20", Es300),
        ("OpenGL ES GLSL ES 1.00 build 1.10@6296936", Es100),
        ("4.60 NVIDIA", Gl140),
    ] {
        assert_eq!(ShaderVersion::parse(s), Some(v), "{s:?}");
    }
    assert_eq!(ShaderVersion::parse(""), None);
    assert_eq!(ShaderVersion::parse("unknown"), None);
}
