//! Typed wrappers over the GL enums used by textures and attachments.

macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $value:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(non_camel_case_types)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The raw GL enum value.
            pub const fn gl(self) -> u32 {
                match self {
                    $(Self::$variant => glow::$value),+
                }
            }
        }
    };
}

/// Converts a restricted format into the general sized format by name.
macro_rules! narrows {
    ($from:ident => $to:ident { $($variant:ident),+ $(,)? }) => {
        impl From<$from> for $to {
            fn from(value: $from) -> Self {
                match value {
                    $($from::$variant => $to::$variant),+
                }
            }
        }
    };
}

gl_enum! {
    /// Storage format for textures uploaded with `glTexImage2D`.
    InternalFormat {
        R = RED,
        RG = RG,
        RGB = RGB,
        RGBA = RGBA,
        Depth = DEPTH_COMPONENT,
        DepthStencil = DEPTH_STENCIL,
        R8 = R8,
        R8_SNORM = R8_SNORM,
        R16 = R16,
        R16_SNORM = R16_SNORM,
        RG8 = RG8,
        RG8_SNORM = RG8_SNORM,
        RG16 = RG16,
        RG16_SNORM = RG16_SNORM,
        R3_G3_B2 = R3_G3_B2,
        RGB4 = RGB4,
        RGB5 = RGB5,
        RGB8 = RGB8,
        RGB8_SNORM = RGB8_SNORM,
        RGB10 = RGB10,
        RGB12 = RGB12,
        RGB16_SNORM = RGB16_SNORM,
        RGBA2 = RGBA2,
        RGBA4 = RGBA4,
        RGB5_A1 = RGB5_A1,
        RGBA8 = RGBA8,
        RGBA8_SNORM = RGBA8_SNORM,
        RGB10_A2 = RGB10_A2,
        RGB10_A2UI = RGB10_A2UI,
        RGBA12 = RGBA12,
        RGBA16 = RGBA16,
        SRGB8 = SRGB8,
        SRGB8_ALPHA8 = SRGB8_ALPHA8,
        R16F = R16F,
        RG16F = RG16F,
        RGB16F = RGB16F,
        RGBA16F = RGBA16F,
        R32F = R32F,
        RG32F = RG32F,
        RGB32F = RGB32F,
        RGBA32F = RGBA32F,
        R11F_G11F_B10F = R11F_G11F_B10F,
        RGB9_E5 = RGB9_E5,
        R8I = R8I,
        R8UI = R8UI,
        R16I = R16I,
        R16UI = R16UI,
        R32I = R32I,
        R32UI = R32UI,
        RG8I = RG8I,
        RG8UI = RG8UI,
        RG16I = RG16I,
        RG16UI = RG16UI,
        RG32I = RG32I,
        RG32UI = RG32UI,
        RGB8I = RGB8I,
        RGB8UI = RGB8UI,
        RGB16I = RGB16I,
        RGB16UI = RGB16UI,
        RGB32I = RGB32I,
        RGB32UI = RGB32UI,
        RGBA8I = RGBA8I,
        RGBA8UI = RGBA8UI,
        RGBA16I = RGBA16I,
        RGBA16UI = RGBA16UI,
        RGBA32I = RGBA32I,
        RGBA32UI = RGBA32UI,
        Compressed_R = COMPRESSED_RED,
        Compressed_RG = COMPRESSED_RG,
        Compressed_RGB = COMPRESSED_RGB,
        Compressed_RGBA = COMPRESSED_RGBA,
        Compressed_SRGB = COMPRESSED_SRGB,
        Compressed_SRGB_ALPHA = COMPRESSED_SRGB_ALPHA,
        Compressed_RED_RGTC1 = COMPRESSED_RED_RGTC1,
        Compressed_SIGNED_RED_RGTC1 = COMPRESSED_SIGNED_RED_RGTC1,
        Compressed_RG_RGTC2 = COMPRESSED_RG_RGTC2,
        Compressed_SIGNED_RG_RGTC2 = COMPRESSED_SIGNED_RG_RGTC2,
        Compressed_RGBA_BPTC_UNORM = COMPRESSED_RGBA_BPTC_UNORM,
        Compressed_SRGB_ALPHA_BPTC_UNORM = COMPRESSED_SRGB_ALPHA_BPTC_UNORM,
        Compressed_RGB_BPTC_SIGNED_FLOAT = COMPRESSED_RGB_BPTC_SIGNED_FLOAT,
        Compressed_RGB_BPTC_UNSIGNED_FLOAT = COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT,
    }
}

gl_enum! {
    /// Immutable storage format, as accepted by `glTexStorage2D`.
    InternalFormatSized {
        R8 = R8,
        R8_SNORM = R8_SNORM,
        R16 = R16,
        R16_SNORM = R16_SNORM,
        RG8 = RG8,
        RG8_SNORM = RG8_SNORM,
        RG16 = RG16,
        RG16_SNORM = RG16_SNORM,
        RGB8 = RGB8,
        RGB8_SNORM = RGB8_SNORM,
        RGB16_SNORM = RGB16_SNORM,
        RGBA4 = RGBA4,
        RGB5_A1 = RGB5_A1,
        RGBA8 = RGBA8,
        RGBA8_SNORM = RGBA8_SNORM,
        RGB10_A2 = RGB10_A2,
        RGB10_A2UI = RGB10_A2UI,
        RGBA16 = RGBA16,
        SRGB8 = SRGB8,
        SRGB8_ALPHA8 = SRGB8_ALPHA8,
        R16F = R16F,
        RG16F = RG16F,
        RGB16F = RGB16F,
        RGBA16F = RGBA16F,
        R32F = R32F,
        RG32F = RG32F,
        RGB32F = RGB32F,
        RGBA32F = RGBA32F,
        R11F_G11F_B10F = R11F_G11F_B10F,
        RGB9_E5 = RGB9_E5,
        R8I = R8I,
        R8UI = R8UI,
        R16I = R16I,
        R16UI = R16UI,
        R32I = R32I,
        R32UI = R32UI,
        RG8I = RG8I,
        RG8UI = RG8UI,
        RG16I = RG16I,
        RG16UI = RG16UI,
        RG32I = RG32I,
        RG32UI = RG32UI,
        RGB8I = RGB8I,
        RGB8UI = RGB8UI,
        RGB16I = RGB16I,
        RGB16UI = RGB16UI,
        RGB32I = RGB32I,
        RGB32UI = RGB32UI,
        RGBA8I = RGBA8I,
        RGBA8UI = RGBA8UI,
        RGBA16I = RGBA16I,
        RGBA16UI = RGBA16UI,
        RGBA32I = RGBA32I,
        RGBA32UI = RGBA32UI,
        Depth32F = DEPTH_COMPONENT32F,
        Depth24 = DEPTH_COMPONENT24,
        Depth16 = DEPTH_COMPONENT16,
        Depth32F_Stencil8 = DEPTH32F_STENCIL8,
        Depth24_Stencil8 = DEPTH24_STENCIL8,
        Stencil8 = STENCIL_INDEX8,
    }
}

gl_enum! {
    /// Storage format of a colour attachment.
    ColorFormat {
        R8 = R8,
        R16 = R16,
        RG8 = RG8,
        RG16 = RG16,
        RGB8 = RGB8,
        RGBA4 = RGBA4,
        RGB5_A1 = RGB5_A1,
        RGBA8 = RGBA8,
        RGB10_A2 = RGB10_A2,
        RGB10_A2UI = RGB10_A2UI,
        RGBA16 = RGBA16,
        SRGB8_ALPHA8 = SRGB8_ALPHA8,
        R16F = R16F,
        RG16F = RG16F,
        RGB16F = RGB16F,
        RGBA16F = RGBA16F,
        R32F = R32F,
        RG32F = RG32F,
        RGB32F = RGB32F,
        RGBA32F = RGBA32F,
        R11F_G11F_B10F = R11F_G11F_B10F,
        R8I = R8I,
        R8UI = R8UI,
        R16I = R16I,
        R16UI = R16UI,
        R32I = R32I,
        R32UI = R32UI,
        RG8I = RG8I,
        RG8UI = RG8UI,
        RG16I = RG16I,
        RG16UI = RG16UI,
        RG32I = RG32I,
        RG32UI = RG32UI,
        RGBA8I = RGBA8I,
        RGBA8UI = RGBA8UI,
        RGBA16I = RGBA16I,
        RGBA16UI = RGBA16UI,
        RGBA32I = RGBA32I,
        RGBA32UI = RGBA32UI,
    }
}

narrows!(ColorFormat => InternalFormatSized {
    R8, R16, RG8, RG16, RGB8, RGBA4, RGB5_A1, RGBA8, RGB10_A2, RGB10_A2UI, RGBA16,
    SRGB8_ALPHA8, R16F, RG16F, RGB16F, RGBA16F, R32F, RG32F, RGB32F, RGBA32F,
    R11F_G11F_B10F, R8I, R8UI, R16I, R16UI, R32I, R32UI, RG8I, RG8UI, RG16I, RG16UI,
    RG32I, RG32UI, RGBA8I, RGBA8UI, RGBA16I, RGBA16UI, RGBA32I, RGBA32UI,
});

gl_enum! {
    /// Storage format of a depth and/or stencil attachment.
    DepthStencilFormat {
        Depth32F = DEPTH_COMPONENT32F,
        Depth24 = DEPTH_COMPONENT24,
        Depth16 = DEPTH_COMPONENT16,
        Depth32F_Stencil8 = DEPTH32F_STENCIL8,
        Depth24_Stencil8 = DEPTH24_STENCIL8,
        Stencil8 = STENCIL_INDEX8,
    }
}

narrows!(DepthStencilFormat => InternalFormatSized {
    Depth32F, Depth24, Depth16, Depth32F_Stencil8, Depth24_Stencil8, Stencil8,
});

impl DepthStencilFormat {
    /// Framebuffer attachment point this format binds to.
    pub const fn attachment_point(self) -> u32 {
        match self {
            Self::Depth16 | Self::Depth24 | Self::Depth32F => glow::DEPTH_ATTACHMENT,
            Self::Stencil8 => glow::STENCIL_ATTACHMENT,
            Self::Depth24_Stencil8 | Self::Depth32F_Stencil8 => glow::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

gl_enum! {
    /// Layout of client pixel data.
    PixelFormat {
        R = RED,
        RG = RG,
        RGB = RGB,
        BGR = BGR,
        RGBA = RGBA,
        BGRA = BGRA,
        R_Integer = RED_INTEGER,
        RG_Integer = RG_INTEGER,
        RGB_Integer = RGB_INTEGER,
        BGR_Integer = BGR_INTEGER,
        RGBA_Integer = RGBA_INTEGER,
        BGRA_Integer = BGRA_INTEGER,
        StencilIndex = STENCIL_INDEX,
        DepthComponent = DEPTH_COMPONENT,
        DepthStencil = DEPTH_STENCIL,
    }
}

gl_enum! {
    /// Scalar type of client pixel data.
    PixelType {
        UnsignedByte = UNSIGNED_BYTE,
        Byte = BYTE,
        UnsignedShort = UNSIGNED_SHORT,
        Short = SHORT,
        UnsignedInt = UNSIGNED_INT,
        Int = INT,
        Float = FLOAT,
        UnsignedByte_3_3_2 = UNSIGNED_BYTE_3_3_2,
        UnsignedByte_2_3_3_Rev = UNSIGNED_BYTE_2_3_3_REV,
        UnsignedShort_5_6_5 = UNSIGNED_SHORT_5_6_5,
        UnsignedShort_5_6_5_Rev = UNSIGNED_SHORT_5_6_5_REV,
        UnsignedShort_4_4_4_4 = UNSIGNED_SHORT_4_4_4_4,
        UnsignedShort_4_4_4_4_Rev = UNSIGNED_SHORT_4_4_4_4_REV,
        UnsignedShort_5_5_5_1 = UNSIGNED_SHORT_5_5_5_1,
        UnsignedShort_1_5_5_5_Rev = UNSIGNED_SHORT_1_5_5_5_REV,
        UnsignedInt_8_8_8_8 = UNSIGNED_INT_8_8_8_8,
        UnsignedInt_8_8_8_8_Rev = UNSIGNED_INT_8_8_8_8_REV,
        UnsignedInt_10_10_10_2 = UNSIGNED_INT_10_10_10_2,
        UnsignedInt_2_10_10_10_Rev = UNSIGNED_INT_2_10_10_10_REV,
    }
}

impl PixelFormat {
    pub const fn component_count(self) -> usize {
        match self {
            Self::R
            | Self::R_Integer
            | Self::StencilIndex
            | Self::DepthComponent
            | Self::DepthStencil => 1,
            Self::RG | Self::RG_Integer => 2,
            Self::RGB | Self::BGR | Self::RGB_Integer | Self::BGR_Integer => 3,
            Self::RGBA | Self::BGRA | Self::RGBA_Integer | Self::BGRA_Integer => 4,
        }
    }
}

impl PixelType {
    /// Packed types store a whole pixel in one value.
    pub const fn is_packed(self) -> bool {
        !matches!(
            self,
            Self::UnsignedByte
                | Self::Byte
                | Self::UnsignedShort
                | Self::Short
                | Self::UnsignedInt
                | Self::Int
                | Self::Float
        )
    }

    /// Size of one component, or of one pixel for packed types.
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::UnsignedByte
            | Self::Byte
            | Self::UnsignedByte_3_3_2
            | Self::UnsignedByte_2_3_3_Rev => 1,
            Self::UnsignedShort
            | Self::Short
            | Self::UnsignedShort_5_6_5
            | Self::UnsignedShort_5_6_5_Rev
            | Self::UnsignedShort_4_4_4_4
            | Self::UnsignedShort_4_4_4_4_Rev
            | Self::UnsignedShort_5_5_5_1
            | Self::UnsignedShort_1_5_5_5_Rev => 2,
            Self::UnsignedInt
            | Self::Int
            | Self::Float
            | Self::UnsignedInt_8_8_8_8
            | Self::UnsignedInt_8_8_8_8_Rev
            | Self::UnsignedInt_10_10_10_2
            | Self::UnsignedInt_2_10_10_10_Rev => 4,
        }
    }
}

/// Bytes one pixel of client data takes.
pub const fn bytes_per_pixel(format: PixelFormat, ty: PixelType) -> usize {
    if ty.is_packed() {
        ty.size_in_bytes()
    } else {
        format.component_count() * ty.size_in_bytes()
    }
}

gl_enum! {
    Filter {
        NearestNeighbour = NEAREST,
        Linear = LINEAR,
        LinearMipmapLinear = LINEAR_MIPMAP_LINEAR,
    }
}

gl_enum! {
    Wrap {
        Repeat = REPEAT,
        MirroredRepeat = MIRRORED_REPEAT,
        ClampToEdge = CLAMP_TO_EDGE,
        ClampToBorder = CLAMP_TO_BORDER,
    }
}

/// Readable name for a `glCheckFramebufferStatus` result.
pub fn framebuffer_status_name(status: u32) -> &'static str {
    match status {
        glow::FRAMEBUFFER_COMPLETE => "FRAMEBUFFER_COMPLETE",
        glow::FRAMEBUFFER_UNDEFINED => "FRAMEBUFFER_UNDEFINED",
        glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        glow::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => {
            "FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT"
        }
        glow::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => "FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER",
        glow::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => "FRAMEBUFFER_INCOMPLETE_READ_BUFFER",
        glow::FRAMEBUFFER_UNSUPPORTED => "FRAMEBUFFER_UNSUPPORTED",
        glow::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
        glow::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => "FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS",
        _ => "UNKNOWN_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── raw values ──────────────────────────────────────────────────────────

    #[test]
    fn enums_map_to_gl_constants() {
        assert_eq!(InternalFormat::RGBA.gl(), 0x1908);
        assert_eq!(InternalFormatSized::RGBA8.gl(), 0x8058);
        assert_eq!(PixelType::UnsignedByte.gl(), 0x1401);
        assert_eq!(PixelFormat::BGRA.gl(), 0x80E1);
        assert_eq!(Filter::Linear.gl(), 0x2601);
        assert_eq!(Wrap::ClampToEdge.gl(), 0x812F);
    }

    #[test]
    fn attachment_formats_narrow_to_the_same_value() {
        for format in [ColorFormat::RGBA8, ColorFormat::R32F, ColorFormat::RGBA16UI] {
            assert_eq!(InternalFormatSized::from(format).gl(), format.gl());
        }
        for format in [
            DepthStencilFormat::Depth16,
            DepthStencilFormat::Depth24_Stencil8,
            DepthStencilFormat::Stencil8,
        ] {
            assert_eq!(InternalFormatSized::from(format).gl(), format.gl());
        }
    }

    #[test]
    fn legacy_internal_formats_are_available() {
        assert_eq!(InternalFormat::R3_G3_B2.gl(), 0x2A10);
        assert_eq!(InternalFormat::RGB4.gl(), 0x804F);
        assert_eq!(InternalFormat::RGB5.gl(), 0x8050);
        assert_eq!(InternalFormat::RGB10.gl(), 0x8052);
        assert_eq!(InternalFormat::RGB12.gl(), 0x8053);
        assert_eq!(InternalFormat::RGBA2.gl(), 0x8055);
        assert_eq!(InternalFormat::RGBA12.gl(), 0x805A);
    }

    // ── pixel sizes ─────────────────────────────────────────────────────────

    #[test]
    fn bytes_per_pixel_multiplies_components() {
        assert_eq!(bytes_per_pixel(PixelFormat::RGBA, PixelType::UnsignedByte), 4);
        assert_eq!(bytes_per_pixel(PixelFormat::RGB, PixelType::Float), 12);
        assert_eq!(bytes_per_pixel(PixelFormat::RG_Integer, PixelType::Short), 4);
        assert_eq!(bytes_per_pixel(PixelFormat::R, PixelType::UnsignedByte), 1);
    }

    #[test]
    fn packed_types_cover_the_whole_pixel() {
        assert_eq!(bytes_per_pixel(PixelFormat::RGB, PixelType::UnsignedShort_5_6_5), 2);
        assert_eq!(bytes_per_pixel(PixelFormat::BGRA, PixelType::UnsignedInt_8_8_8_8_Rev), 4);
        assert_eq!(bytes_per_pixel(PixelFormat::RGB, PixelType::UnsignedByte_3_3_2), 1);
    }

    // ── attachment points ───────────────────────────────────────────────────

    #[test]
    fn depth_stencil_attachment_point_follows_format() {
        use DepthStencilFormat::*;
        for f in [Depth16, Depth24, Depth32F] {
            assert_eq!(f.attachment_point(), glow::DEPTH_ATTACHMENT);
        }
        assert_eq!(Stencil8.attachment_point(), glow::STENCIL_ATTACHMENT);
        for f in [Depth24_Stencil8, Depth32F_Stencil8] {
            assert_eq!(f.attachment_point(), glow::DEPTH_STENCIL_ATTACHMENT);
        }
    }

    #[test]
    fn framebuffer_status_names() {
        assert_eq!(
            framebuffer_status_name(glow::FRAMEBUFFER_UNSUPPORTED),
            "FRAMEBUFFER_UNSUPPORTED"
        );
        assert_eq!(framebuffer_status_name(0), "UNKNOWN_ERROR");
    }
}
