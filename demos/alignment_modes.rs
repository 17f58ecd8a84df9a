use pairwise_aligner::{AlignmentMode, PairwiseAligner, ScoringScheme, Sequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seq1 = Sequence::new("ACGTACGT");
    let seq2 = Sequence::new("ACGTAGCT");

    for mode in [AlignmentMode::Global, AlignmentMode::Local] {
        let aligner = PairwiseAligner::default()
            .with_alignment_mode(mode)
            .with_scoring(ScoringScheme::new(2, -1, -2));

        let result = aligner.align(&seq1, &seq2)?;

        println!("{} ({})", mode, mode.algorithm());
        println!("Score: {}", result.score());
        println!("Identity: {:.2}%", result.identity());
        println!("Aligned sequence 1: {}", result.aligned_seq1());
        println!("                    {}", result.match_line());
        println!("Aligned sequence 2: {}", result.aligned_seq2());
        println!("CIGAR: {}", result.cigar());
        println!();
    }

    Ok(())
}
