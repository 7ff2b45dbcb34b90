use {
    image::Yuv420Image,
    std::io::{self, Write},
};

/// Appends canonical frames to a byte stream: Y rows, then U rows, then V
/// rows, logical width only.
pub(crate) struct Persister<W: Write> {
    writer: W,
}

impl<W: Write> Persister<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one frame and flush it. On error, whatever already reached the
    /// writer stays there.
    pub fn write_image(&mut self, image: &Yuv420Image) -> io::Result<()> {
        for index in 0..3 {
            for row in image.rows(index) {
                self.writer.write_all(row)?;
            }
        }
        self.writer.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use {super::*, base::Vec2};

    // accepts `capacity` bytes, then reports a full disk
    struct FullDisk {
        data: Vec<u8>,
        capacity: usize,
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity - self.data.len();
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
            }
            let n = buf.len().min(room);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_image_skips_stride_padding() {
        let mut image = Yuv420Image::try_new(Vec2::new(6, 4)).unwrap();
        image.fill(1, 2, 3);
        let mut persister = Persister::new(Vec::new());
        persister.write_image(&image).unwrap();
        let out = persister.into_inner();
        assert_eq!(out.len(), 24 + 2 * 6);
        assert_eq!(&out[..24], &[1; 24]);
        assert_eq!(&out[24..30], &[2; 6]);
        assert_eq!(&out[30..], &[3; 6]);
    }

    #[test]
    fn test_partial_frame_is_not_retracted() {
        let mut image = Yuv420Image::try_new(Vec2::new(4, 4)).unwrap();
        image.fill(9, 9, 9);
        let mut persister = Persister::new(FullDisk {
            data: Vec::new(),
            capacity: 10,
        });
        let result = persister.write_image(&image);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::StorageFull);
        assert_eq!(persister.into_inner().data.len(), 10);
    }
}
