use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::{debug, info};

use crate::compression::codec::{BlockSort, Codec, MoveToFront, RangeCoder, RunLength};
use crate::error::{PackError, Result};

/// The four codec stages, named the way the command line spells them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Bwt,
    Mtf,
    Rle,
    Arith,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Bwt => "bwt",
            Stage::Mtf => "mtf",
            Stage::Rle => "rle",
            Stage::Arith => "arith",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Stage {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bwt" => Ok(Stage::Bwt),
            "mtf" => Ok(Stage::Mtf),
            "rle" => Ok(Stage::Rle),
            "arith" => Ok(Stage::Arith),
            _ => Err(PackError::UnknownStage(s.to_string())),
        }
    }
}

/// Parse a comma separated stage list such as "bwt,mtf,rle,arith".
pub fn parse_stages(list: &str) -> Result<Vec<Stage>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Stage>())
        .collect()
}

/// A chain of stages, each one fed the output of the one before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
    /// Escape byte handed to the run-length stage.
    pub escape: u8,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>, escape: u8) -> Self {
        Self { stages, escape }
    }

    /// Block sort, move-to-front, run-length, then arithmetic coding.
    pub fn classic(escape: u8) -> Self {
        Self::new(vec![Stage::Bwt, Stage::Mtf, Stage::Rle, Stage::Arith], escape)
    }

    fn codec(&self, stage: Stage) -> Box<dyn Codec> {
        match stage {
            Stage::Bwt => Box::new(BlockSort),
            Stage::Mtf => Box::new(MoveToFront),
            Stage::Rle => Box::new(RunLength::new(self.escape)),
            Stage::Arith => Box::new(RangeCoder),
        }
    }

    /// Run every stage in order.
    pub fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut buf = data.to_vec();
        for &stage in &self.stages {
            let before = buf.len();
            buf = self.codec(stage).pack(&buf)?;
            debug!("{} packed {} bytes into {}", stage, before, buf.len());
        }
        info!("Packed {} bytes into {}", data.len(), buf.len());
        Ok(buf)
    }

    /// Undo every stage, last one first.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut buf = data.to_vec();
        for &stage in self.stages.iter().rev() {
            let before = buf.len();
            buf = self.codec(stage).unpack(&buf)?;
            debug!("{} unpacked {} bytes into {}", stage, before, buf.len());
        }
        info!("Unpacked {} bytes into {}", data.len(), buf.len());
        Ok(buf)
    }
}

impl Display for Pipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = self
            .stages
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<String>>();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TEXT: &str = "It was the best of times, it was the worst of times, it was the age of \
        wisdom, it was the age of foolishness, it was the epoch of belief, it was the epoch of \
        incredulity, it was the season of Light, it was the season of Darkness........";

    #[test]
    fn parse_test() {
        assert_eq!(
            parse_stages("bwt,mtf,rle,arith").unwrap(),
            vec![Stage::Bwt, Stage::Mtf, Stage::Rle, Stage::Arith]
        );
        assert_eq!(parse_stages(" MTF , arith").unwrap(), vec![Stage::Mtf, Stage::Arith]);
        assert!(parse_stages("").unwrap().is_empty());
        assert!(matches!(
            parse_stages("bwt,lz77"),
            Err(PackError::UnknownStage(name)) if name == "lz77"
        ));
    }

    #[test]
    fn display_test() {
        assert_eq!(Pipeline::classic(0xff).to_string(), "bwt,mtf,rle,arith");
        for stage in [Stage::Bwt, Stage::Mtf, Stage::Rle, Stage::Arith] {
            assert_eq!(stage.to_string().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn classic_text_test() {
        let pipeline = Pipeline::classic(0xff);
        let packed = pipeline.pack(TEXT.as_bytes()).unwrap();
        assert_eq!(pipeline.unpack(&packed).unwrap(), TEXT.as_bytes().to_vec());
    }

    #[test]
    fn classic_shrinks_repetitive_data_test() {
        let data = TEXT.repeat(20);
        let pipeline = Pipeline::classic(0xff);
        let packed = pipeline.pack(data.as_bytes()).unwrap();
        assert!(packed.len() < data.len() / 3);
        assert_eq!(pipeline.unpack(&packed).unwrap(), data.as_bytes().to_vec());
    }

    #[test]
    fn subset_test() {
        let data = TEXT.as_bytes().to_vec();
        for stages in ["bwt", "mtf,arith", "rle", "bwt,rle", "arith"] {
            let pipeline = Pipeline::new(parse_stages(stages).unwrap(), 0x01);
            let packed = pipeline.pack(&data).unwrap();
            assert_eq!(pipeline.unpack(&packed).unwrap(), data, "stages {}", stages);
        }
    }

    #[test]
    fn empty_pipeline_test() {
        let pipeline = Pipeline::new(vec![], 0);
        assert_eq!(pipeline.pack(b"as is").unwrap(), b"as is".to_vec());
        assert_eq!(pipeline.unpack(b"as is").unwrap(), b"as is".to_vec());
    }

    #[test]
    fn collision_surfaces_test() {
        // After the block sort and rank transform, runs turn into zeros
        let pipeline = Pipeline::new(vec![Stage::Bwt, Stage::Mtf, Stage::Rle], 0);
        assert!(matches!(
            pipeline.pack(TEXT.as_bytes()),
            Err(PackError::EscapeByteCollision { escape: 0, .. })
        ));
    }
}
